//! Small reference records embedded in larger ones

use serde::{Deserialize, Serialize};

/// `{ "id": 1, "name": "..." }` reference to a user, client, project or task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdName {
    pub id: i64,
    pub name: String,
}

/// `{ "id": 1, "number": "..." }` reference to an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdNumber {
    pub id: i64,
    pub number: String,
}

/// Project reference carried by task assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
}

/// Link from a Harvest record to an item in a third-party system.
///
/// Only `id`, `group_id` and `permalink` are writable; `service` and
/// `service_icon_url` are filled in by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    pub id: String,
    pub group_id: String,
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_icon_url: Option<String>,
}

impl ExternalReference {
    pub fn new(
        id: impl Into<String>,
        group_id: impl Into<String>,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            permalink: permalink.into(),
            service: None,
            service_icon_url: None,
        }
    }
}
