//! Clients (the customers a project is billed to)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::paging::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub currency: Option<String>,
    pub address: Option<String>,
    pub statement_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `GET /v2/clients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientsResponse {
    pub clients: Vec<Client>,
    #[serde(flatten)]
    pub pagination: Pagination,
}
