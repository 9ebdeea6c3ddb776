use harvest_domain::{Client, ClientsResponse, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::PageParams;
use crate::client::HarvestClient;

impl HarvestClient {
    #[instrument(skip(self, paging, cancel))]
    pub async fn list_clients(
        &self,
        is_active: Option<bool>,
        paging: PageParams,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<ClientsResponse> {
        let request = self
            .account_request(Method::GET, "/clients", account_id)?
            .query("is_active", is_active)
            .page_since(paging.updated_since, paging.page, paging.per_page);
        self.send("clients::list", request, cancel).await
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_client(
        &self,
        client_id: i64,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Client> {
        let request =
            self.account_request(Method::GET, &format!("/clients/{client_id}"), account_id)?;
        self.send("clients::get", request, cancel).await
    }
}
