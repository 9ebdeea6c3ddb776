//! Projects

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::IdName;
use super::paging::Pagination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub is_active: bool,
    pub is_billable: bool,
    pub is_fixed_fee: Option<bool>,
    pub bill_by: Option<String>,
    pub budget: Option<f64>,
    pub budget_by: Option<String>,
    pub budget_is_monthly: Option<bool>,
    pub notify_when_over_budget: Option<bool>,
    pub over_budget_notification_percentage: Option<f64>,
    pub over_budget_notification_date: Option<NaiveDate>,
    pub show_budget_to_all: Option<bool>,
    pub cost_budget: Option<f64>,
    pub cost_budget_include_expenses: Option<bool>,
    pub hourly_rate: Option<f64>,
    pub fee: Option<f64>,
    pub notes: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub client: Option<IdName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /v2/projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
