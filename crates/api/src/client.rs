//! Harvest API client
//!
//! Owns one transport, one token session and, when OAuth client credentials
//! are configured, one OAuth flow. Every endpoint call refreshes an expired
//! token first, then builds, sends and decodes a single request.

use std::time::{Duration, Instant};

use harvest_common::auth::{
    AuthResult, OAuthConfig, OAuthFlow, ResponseType, TokenRefreshed, TokenSession,
};
use harvest_common::http::{HttpClient, RequestBuilder};
use harvest_domain::constants::API_VERSION_PREFIX;
use harvest_domain::{HarvestConfig, HarvestError, Result};
use parking_lot::RwLock;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};
use url::Url;

use crate::logging::log_api_call;

/// Typed client for the Harvest v2 API.
///
/// `Send + Sync`; share it behind an `Arc`.
pub struct HarvestClient {
    config: HarvestConfig,
    http: HttpClient,
    session: TokenSession,
    oauth: Option<OAuthFlow>,
    default_account_id: RwLock<Option<i64>>,
}

impl HarvestClient {
    /// Create a client from configuration.
    ///
    /// An OAuth flow is set up when `client_id` is configured. A configured
    /// `access_token` is installed right away as a token of unknown
    /// lifetime, which is never refreshed.
    ///
    /// # Errors
    /// Returns [`HarvestError::Config`] for an unusable OAuth configuration
    /// and [`HarvestError::Network`] if the transport cannot be built.
    pub fn new(config: HarvestConfig) -> Result<Self> {
        let mut builder =
            HttpClient::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build()?;

        let oauth = match config.client_id.as_deref() {
            Some(id) if !id.is_empty() => {
                Some(OAuthFlow::new(OAuthConfig::from_harvest_config(&config)?)?)
            }
            _ => None,
        };

        let session = TokenSession::new(http.clone());
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            session.authorize(token, None, 0)?;
        }

        info!(oauth = oauth.is_some(), "Harvest client created");

        Ok(Self {
            default_account_id: RwLock::new(config.default_account_id),
            config,
            http,
            session,
            oauth,
        })
    }

    /// Client for a personal access token.
    pub fn from_access_token(
        user_agent: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        Self::new(HarvestConfig {
            user_agent: Some(user_agent.into()),
            access_token: Some(access_token.into()),
            ..HarvestConfig::default()
        })
    }

    /// Replace the OAuth flow, e.g. to inject a random source.
    #[must_use]
    pub fn with_oauth_flow(mut self, flow: OAuthFlow) -> Self {
        self.oauth = Some(flow);
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub fn session(&self) -> &TokenSession {
        &self.session
    }

    pub fn oauth(&self) -> Option<&OAuthFlow> {
        self.oauth.as_ref()
    }

    /// Account used when a call names none.
    pub fn default_account_id(&self) -> Option<i64> {
        *self.default_account_id.read()
    }

    pub fn set_default_account_id(&self, account_id: Option<i64>) {
        *self.default_account_id.write() = account_id;
    }

    /// Receiver for token refresh notifications, for callers that persist
    /// tokens.
    pub fn subscribe(&self) -> broadcast::Receiver<TokenRefreshed> {
        self.session.subscribe()
    }

    /// Install tokens obtained elsewhere.
    pub fn authorize(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_in_seconds: i64,
    ) -> Result<()> {
        self.session.authorize(access_token, refresh_token, expires_in_seconds)
    }

    /// Login URL for the configured OAuth client.
    pub fn build_authorization_url(
        &self,
        state: Option<&str>,
        scope: Option<&str>,
        response_type: ResponseType,
    ) -> Result<Url> {
        self.require_oauth()?.build_authorization_url(state, scope, response_type)
    }

    pub fn is_callback_uri(&self, uri: &Url) -> bool {
        self.oauth.as_ref().is_some_and(|flow| flow.is_callback_uri(uri))
    }

    /// Complete a login and authorize the session.
    ///
    /// When no default account is set, it is taken from a scope that grants
    /// exactly one Harvest account.
    #[instrument(skip(self, callback, cancel))]
    pub async fn handle_callback(
        &self,
        callback: &Url,
        cancel: &CancellationToken,
    ) -> Result<AuthResult> {
        let result = self.require_oauth()?.handle_callback(callback, cancel).await?;
        self.session.authorize_with(&result)?;

        if self.default_account_id().is_none() {
            if let Some(account_id) = result.default_account_id() {
                debug!(account_id, "default account taken from scope");
                self.set_default_account_id(Some(account_id));
            }
        }

        Ok(result)
    }

    /// Refresh the session's tokens now.
    ///
    /// # Errors
    /// [`HarvestError::Config`] without OAuth credentials,
    /// [`HarvestError::MissingRefreshToken`] without a refresh token,
    /// otherwise token endpoint errors.
    #[instrument(skip(self, cancel))]
    pub async fn refresh_token(&self, cancel: &CancellationToken) -> Result<AuthResult> {
        let flow = self.require_oauth()?;
        let refresh_token = self.session.refresh_token().ok_or(HarvestError::MissingRefreshToken)?;

        let result = flow.refresh_token(&refresh_token, cancel).await?;
        self.session.authorize_with(&result)?;
        Ok(result)
    }

    async fn ensure_fresh_token(&self, cancel: &CancellationToken) -> Result<()> {
        if self.oauth.is_none() {
            return Ok(());
        }

        self.session
            .refresh_if_needed(|| async { self.refresh_token(cancel).await.map(|_| ()) })
            .await
            .map(|_| ())
    }

    /// Request against the resource API, scoped to `account_id` or the
    /// default account.
    pub(crate) fn account_request(
        &self,
        method: Method,
        path: &str,
        account_id: Option<i64>,
    ) -> Result<RequestBuilder> {
        let account_id = account_id.or_else(|| self.default_account_id()).ok_or_else(|| {
            HarvestError::Config("account_id or default_account_id should be specified".into())
        })?;
        let user_agent = self.require_user_agent()?;

        let url = format!(
            "{}{API_VERSION_PREFIX}{path}",
            self.config.api_base_url.trim_end_matches('/')
        );
        Ok(RequestBuilder::begin(method, url).account_id(Some(account_id)).user_agent(user_agent))
    }

    /// Request against the identity server; no account scoping.
    pub(crate) fn identity_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.config.id_base_url.trim_end_matches('/'));
        let request = RequestBuilder::begin(method, url);
        match &self.config.user_agent {
            Some(agent) => request.user_agent(agent.clone()),
            None => request,
        }
    }

    pub(crate) async fn send<T>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let result = async {
            self.ensure_fresh_token(cancel).await?;
            request.send(&self.http, cancel).await
        }
        .await;
        log_api_call(endpoint, started.elapsed(), result.as_ref().err());
        result
    }

    pub(crate) async fn execute(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let started = Instant::now();
        let result = async {
            self.ensure_fresh_token(cancel).await?;
            request.execute(&self.http, cancel).await
        }
        .await;
        log_api_call(endpoint, started.elapsed(), result.as_ref().err());
        result
    }

    fn require_oauth(&self) -> Result<&OAuthFlow> {
        self.oauth
            .as_ref()
            .ok_or_else(|| {
                HarvestError::Config("OAuth client credentials are not configured".into())
            })
    }

    fn require_user_agent(&self) -> Result<&str> {
        self.config
            .user_agent
            .as_deref()
            .filter(|agent| !agent.is_empty())
            .ok_or_else(|| HarvestError::Config("user_agent should be specified".into()))
    }
}

impl std::fmt::Debug for HarvestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("oauth", &self.oauth.is_some())
            .field("default_account_id", &self.default_account_id())
            .finish()
    }
}
