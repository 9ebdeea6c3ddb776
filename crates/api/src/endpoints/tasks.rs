use harvest_domain::{Result, Task, TasksResponse};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::PageParams;
use crate::client::HarvestClient;

impl HarvestClient {
    #[instrument(skip(self, paging, cancel))]
    pub async fn list_tasks(
        &self,
        is_active: Option<bool>,
        paging: PageParams,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<TasksResponse> {
        let request = self
            .account_request(Method::GET, "/tasks", account_id)?
            .query("is_active", is_active)
            .page_since(paging.updated_since, paging.page, paging.per_page);
        self.send("tasks::list", request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_task(
        &self,
        task_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Task> {
        let request = self.account_request(Method::GET, &format!("/tasks/{task_id}"), account_id)?;
        self.send("tasks::get", request, cancel).await
    }
}
