//! Users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::paging::Pagination;

/// Compact user record embedded in account listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Full user record from `/v2/users` and `/v2/users/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub timezone: Option<String>,
    pub has_access_to_all_future_projects: Option<bool>,
    pub is_contractor: Option<bool>,
    pub is_active: bool,
    pub weekly_capacity: Option<i64>,
    pub default_hourly_rate: Option<f64>,
    pub cost_rate: Option<f64>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub access_roles: Vec<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// `GET /v2/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserDetails>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
