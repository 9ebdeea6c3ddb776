//! Time entries
//!
//! Creation is form-encoded; updates are sent as JSON so that only the
//! fields being changed travel.

use chrono::{NaiveDate, NaiveTime};
use harvest_domain::{ExternalReference, Result, TimeEntriesResponse, TimeEntry};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::PageParams;
use crate::client::HarvestClient;

/// Filters for `GET /v2/time_entries`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryFilter {
    pub user_id: Option<i64>,
    pub client_id: Option<i64>,
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub is_billed: Option<bool>,
    pub is_running: Option<bool>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub paging: PageParams,
}

/// Body of `POST /v2/time_entries`.
///
/// Give either `hours` (duration tracking) or `started_time`/`ended_time`
/// (start/end tracking), matching the account's setting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeEntry {
    pub project_id: i64,
    pub task_id: i64,
    pub spent_date: NaiveDate,
    pub user_id: Option<i64>,
    pub started_time: Option<NaiveTime>,
    pub ended_time: Option<NaiveTime>,
    pub hours: Option<f64>,
    pub notes: Option<String>,
    pub external_reference: Option<ExternalReference>,
}

impl NewTimeEntry {
    pub fn new(project_id: i64, task_id: i64, spent_date: NaiveDate) -> Self {
        Self {
            project_id,
            task_id,
            spent_date,
            user_id: None,
            started_time: None,
            ended_time: None,
            hours: None,
            notes: None,
            external_reference: None,
        }
    }

    #[must_use]
    pub fn hours(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update of a time entry; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryUpdate {
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub spent_date: Option<NaiveDate>,
    pub started_time: Option<NaiveTime>,
    pub ended_time: Option<NaiveTime>,
    pub hours: Option<f64>,
    pub notes: Option<String>,
    pub external_reference: Option<ExternalReference>,
}

impl HarvestClient {
    #[instrument(skip(self, filter, cancel))]
    pub async fn list_time_entries(
        &self,
        filter: &TimeEntryFilter,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TimeEntriesResponse> {
        let paging = filter.paging;
        let request = self
            .account_request(Method::GET, "/time_entries", account_id)?
            .query("user_id", filter.user_id)
            .query("client_id", filter.client_id)
            .query("project_id", filter.project_id)
            .query("task_id", filter.task_id)
            .query("is_billed", filter.is_billed)
            .query("is_running", filter.is_running)
            .query("from", filter.from)
            .query("to", filter.to)
            .page_since(paging.updated_since, paging.page, paging.per_page);
        self.send("time_entries::list", request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_time_entry(
        &self,
        entry_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TimeEntry> {
        let request =
            self.account_request(Method::GET, &format!("/time_entries/{entry_id}"), account_id)?;
        self.send("time_entries::get", request, cancel).await
    }

    #[instrument(skip(self, entry, cancel), fields(project_id = entry.project_id))]
    pub async fn create_time_entry(
        &self,
        entry: &NewTimeEntry,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TimeEntry> {
        let request = self
            .account_request(Method::POST, "/time_entries", account_id)?
            .body("project_id", entry.project_id)
            .body("task_id", entry.task_id)
            .body("spent_date", entry.spent_date)
            .body("user_id", entry.user_id)
            .body("started_time", entry.started_time)
            .body("ended_time", entry.ended_time)
            .body("hours", entry.hours)
            .body("notes", entry.notes.as_deref())
            .external_reference("external_reference", entry.external_reference.as_ref());
        self.send("time_entries::create", request, cancel).await
    }

    #[instrument(skip(self, update, cancel))]
    pub async fn update_time_entry(
        &self,
        entry_id: i64,
        update: &TimeEntryUpdate,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TimeEntry> {
        let request = self
            .account_request(Method::PATCH, &format!("/time_entries/{entry_id}"), account_id)?
            .use_json()
            .body("project_id", update.project_id)
            .body("task_id", update.task_id)
            .body("spent_date", update.spent_date)
            .body("started_time", update.started_time)
            .body("ended_time", update.ended_time)
            .body("hours", update.hours)
            .body("notes", update.notes.as_deref())
            .external_reference("external_reference", update.external_reference.as_ref());
        self.send("time_entries::update", request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn delete_time_entry(
        &self,
        entry_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let request =
            self.account_request(Method::DELETE, &format!("/time_entries/{entry_id}"), account_id)?;
        self.execute("time_entries::delete", request, cancel).await
    }

    /// Restart a stopped timer.
    #[instrument(skip(self, cancel))]
    pub async fn restart_time_entry(
        &self,
        entry_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TimeEntry> {
        let path = format!("/time_entries/{entry_id}/restart");
        let request = self.account_request(Method::PATCH, &path, account_id)?;
        self.send("time_entries::restart", request, cancel).await
    }

    /// Stop a running timer.
    #[instrument(skip(self, cancel))]
    pub async fn stop_time_entry(
        &self,
        entry_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TimeEntry> {
        let path = format!("/time_entries/{entry_id}/stop");
        let request = self.account_request(Method::PATCH, &path, account_id)?;
        self.send("time_entries::stop", request, cancel).await
    }
}
