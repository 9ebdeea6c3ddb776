//! Pagination envelope shared by every list response

use serde::{Deserialize, Serialize};

/// Page metadata flattened into each `*Response` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub per_page: u32,
    pub total_pages: u32,
    pub total_entries: u32,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
    pub page: u32,
    pub links: Option<PageLinks>,
}

impl Pagination {
    /// `true` when the server reports another page after this one.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: Option<String>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub last: Option<String>,
}
