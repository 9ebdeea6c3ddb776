//! Time entries

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ExternalReference, IdName, IdNumber};
use super::paging::Pagination;

/// A tracked block of time against a project task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub spent_date: NaiveDate,
    pub user: IdName,
    pub client: IdName,
    pub project: IdName,
    pub task: IdName,
    pub invoice: Option<IdNumber>,
    pub hours: f64,
    pub notes: Option<String>,
    pub is_locked: bool,
    pub locked_reason: Option<String>,
    pub is_closed: bool,
    pub is_billed: bool,
    pub timer_started_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::time_of_day")]
    pub started_time: Option<NaiveTime>,
    #[serde(default, with = "crate::utils::time_of_day")]
    pub ended_time: Option<NaiveTime>,
    pub is_running: bool,
    pub billable: bool,
    pub budgeted: bool,
    pub billable_rate: Option<f64>,
    pub cost_rate: Option<f64>,
    pub external_reference: Option<ExternalReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /v2/time_entries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntriesResponse {
    pub time_entries: Vec<TimeEntry>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
