//! Tasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::paging::Pagination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub billable_by_default: bool,
    pub default_hourly_rate: Option<f64>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /v2/tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
