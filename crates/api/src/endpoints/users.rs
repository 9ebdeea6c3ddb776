//! Users

use harvest_domain::{Result, UserDetails, UsersResponse};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::PageParams;
use crate::client::HarvestClient;

/// Body of `POST /v2/users`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub timezone: Option<String>,
    pub is_contractor: Option<bool>,
    pub is_active: Option<bool>,
    /// Seconds per week
    pub weekly_capacity: Option<i64>,
    pub default_hourly_rate: Option<f64>,
    pub cost_rate: Option<f64>,
    pub roles: Option<Vec<String>>,
    pub access_roles: Option<Vec<String>>,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

impl HarvestClient {
    /// The user the token belongs to.
    #[instrument(skip(self, cancel))]
    pub async fn get_me(
        &self,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<UserDetails> {
        let request = self.account_request(Method::GET, "/users/me", account_id)?;
        self.send("users::me", request, cancel).await
    }

    #[instrument(skip(self, paging, cancel))]
    pub async fn list_users(
        &self,
        is_active: Option<bool>,
        paging: PageParams,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<UsersResponse> {
        let request = self
            .account_request(Method::GET, "/users", account_id)?
            .query("is_active", is_active)
            .page_since(paging.updated_since, paging.page, paging.per_page);
        self.send("users::list", request, cancel).await
    }

    /// Invite a user. Sent as JSON because roles are arrays.
    #[instrument(skip(self, user, cancel))]
    pub async fn create_user(
        &self,
        user: &NewUser,
        account_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<UserDetails> {
        let request = self
            .account_request(Method::POST, "/users", account_id)?
            .use_json()
            .body("first_name", &user.first_name)
            .body("last_name", &user.last_name)
            .body("email", &user.email)
            .body("timezone", user.timezone.as_deref())
            .body("is_contractor", user.is_contractor)
            .body("is_active", user.is_active)
            .body("weekly_capacity", user.weekly_capacity)
            .body("default_hourly_rate", user.default_hourly_rate)
            .body("cost_rate", user.cost_rate)
            .array("roles", user.roles.clone())
            .array("access_roles", user.access_roles.clone());
        self.send("users::create", request, cancel).await
    }
}
