use harvest_domain::{Project, ProjectsResponse, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::PageParams;
use crate::client::HarvestClient;

impl HarvestClient {
    #[instrument(skip(self, paging, cancel))]
    pub async fn list_projects(
        &self,
        is_active: Option<bool>,
        client_id: Option<i64>,
        paging: PageParams,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<ProjectsResponse> {
        let request = self
            .account_request(Method::GET, "/projects", account_id)?
            .query("is_active", is_active)
            .query("client_id", client_id)
            .page_since(paging.updated_since, paging.page, paging.per_page);
        self.send("projects::list", request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_project(
        &self,
        project_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Project> {
        let request =
            self.account_request(Method::GET, &format!("/projects/{project_id}"), account_id)?;
        self.send("projects::get", request, cancel).await
    }
}
