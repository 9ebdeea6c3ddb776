//! Project and task assignments for the current user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{IdName, ProjectReference};
use super::paging::Pagination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub id: i64,
    pub billable: Option<bool>,
    pub is_active: bool,
    pub hourly_rate: Option<f64>,
    pub budget: Option<f64>,
    pub task: IdName,
    pub project: Option<ProjectReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    pub id: i64,
    pub is_project_manager: bool,
    pub is_active: bool,
    pub budget: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub project: ProjectReference,
    pub client: IdName,
    #[serde(default)]
    pub task_assignments: Vec<TaskAssignment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /v2/users/{id|me}/project_assignments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssignmentsResponse {
    pub project_assignments: Vec<ProjectAssignment>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
