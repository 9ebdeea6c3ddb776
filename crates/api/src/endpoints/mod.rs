//! Endpoint surface
//!
//! Each module adds `impl HarvestClient` methods for one resource. Calls
//! that take an `account_id` fall back to the client's default account.

use chrono::{DateTime, Utc};

pub mod accounts;
pub mod assignments;
pub mod clients;
pub mod projects;
pub mod tasks;
pub mod time_entries;
pub mod users;

pub use time_entries::{NewTimeEntry, TimeEntryFilter, TimeEntryUpdate};
pub use users::NewUser;

/// `updated_since`, `page` and `per_page` accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub updated_since: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self { page: Some(page), ..Self::default() }
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }
}
