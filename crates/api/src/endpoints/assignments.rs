use harvest_domain::{ProjectAssignmentsResponse, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::PageParams;
use crate::client::HarvestClient;

impl HarvestClient {
    /// Project assignments of `user_id`, or of the token's own user when
    /// `None`.
    #[instrument(skip(self, paging, cancel))]
    pub async fn list_project_assignments(
        &self,
        user_id: Option<i64>,
        paging: PageParams,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<ProjectAssignmentsResponse> {
        let user = user_id.map_or_else(|| "me".to_string(), |id| id.to_string());
        let path = format!("/users/{user}/project_assignments");
        let request = self
            .account_request(Method::GET, &path, account_id)?
            .page_since(paging.updated_since, paging.page, paging.per_page);
        self.send("assignments::list", request, cancel).await
    }
}
