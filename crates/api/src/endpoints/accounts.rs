use harvest_domain::constants::ACCOUNTS_PATH;
use harvest_domain::{AccountsResponse, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::client::HarvestClient;

impl HarvestClient {
    /// Accounts the token can access, from the identity server.
    ///
    /// Not account scoped, so no account id is needed.
    #[instrument(skip(self, cancel))]
    pub async fn get_accounts(&self, cancel: &CancellationToken) -> Result<AccountsResponse> {
        let request = self.identity_request(Method::GET, ACCOUNTS_PATH);
        self.send("accounts::list", request, cancel).await
    }
}
