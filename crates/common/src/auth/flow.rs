//! OAuth 2.0 flow against the Harvest identity server
//!
//! Handles the browser-based authorization flow:
//! - Authorization URL building with an anti-forgery state
//! - Callback recognition and state validation
//! - Implicit grant extraction and authorization code exchange
//! - Token refresh

use std::collections::HashMap;
use std::sync::Arc;

use harvest_domain::constants::DEFAULT_TOKEN_TYPE;
use harvest_domain::{HarvestError, Result, TokenResponse};
use parking_lot::Mutex;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::state::{generate_state, validate_state, OsRandom};
use super::traits::RandomSource;
use super::types::{AuthResult, OAuthConfig, ResponseType};
use crate::http::{query, HttpClient, RequestBuilder};

/// OAuth 2.0 flow for one registered Harvest OAuth client.
///
/// Holds the pending state between [`OAuthFlow::build_authorization_url`]
/// and [`OAuthFlow::handle_callback`]. The token endpoint is called through
/// its own transport, never carrying the resource API's bearer token.
pub struct OAuthFlow {
    config: OAuthConfig,
    http: HttpClient,
    random: Arc<dyn RandomSource>,
    pending_state: Mutex<Option<String>>,
}

impl OAuthFlow {
    /// Create a flow with an OS-backed random source.
    ///
    /// # Errors
    /// Returns [`HarvestError::Network`] if the transport cannot be built.
    pub fn new(config: OAuthConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self {
            config,
            http: builder.build()?,
            random: Arc::new(OsRandom),
            pending_state: Mutex::new(None),
        })
    }

    /// Replace the random source used for state generation.
    #[must_use]
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Replace the transport used for token endpoint calls.
    #[must_use]
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// State generated by the last `build_authorization_url`, until a
    /// callback consumes it.
    #[must_use]
    pub fn pending_state(&self) -> Option<String> {
        self.pending_state.lock().clone()
    }

    /// Build the URL the user should be sent to for login.
    ///
    /// A fresh state is generated when `state` is `None`. Either way it
    /// becomes the pending state checked by [`OAuthFlow::handle_callback`].
    ///
    /// # Errors
    /// Returns [`HarvestError::Config`] if the client id is empty or no
    /// redirect URI is configured.
    pub fn build_authorization_url(
        &self,
        state: Option<&str>,
        scope: Option<&str>,
        response_type: ResponseType,
    ) -> Result<Url> {
        if self.config.client_id.is_empty() {
            return Err(HarvestError::Config("client_id is required to start a login".into()));
        }
        let redirect_uri = self.config.redirect_uri.as_ref().ok_or_else(|| {
            HarvestError::Config("redirect_uri is required to start a login".into())
        })?;

        let state = match state {
            Some(state) => state.to_string(),
            None => generate_state(self.random.as_ref()),
        };

        let mut url = Url::parse(&self.config.authorization_url())?;
        query::append(
            &mut url,
            [
                ("client_id", Some(self.config.client_id.as_str())),
                ("redirect_uri", Some(redirect_uri.as_str())),
                ("state", Some(state.as_str())),
                ("scope", scope),
                ("response_type", Some(response_type.as_str())),
            ],
        );

        *self.pending_state.lock() = Some(state);
        debug!(%response_type, "built authorization URL");

        Ok(url)
    }

    /// `true` when `uri` points at the configured redirect URI.
    #[must_use]
    pub fn is_callback_uri(&self, uri: &Url) -> bool {
        self.config.redirect_uri.as_ref().is_some_and(|redirect| is_callback_uri(uri, redirect))
    }

    /// Complete a login from the redirect the identity server sent back.
    ///
    /// Consumes the pending state: a second callback for the same login
    /// fails with [`HarvestError::AuthStateMismatch`].
    #[instrument(skip(self, callback, cancel))]
    pub async fn handle_callback(
        &self,
        callback: &Url,
        cancel: &CancellationToken,
    ) -> Result<AuthResult> {
        let expected = self.pending_state.lock().take();
        self.handle_callback_with_state(callback, expected.as_deref(), cancel).await
    }

    /// Complete a login against an explicitly supplied expected state.
    ///
    /// # Errors
    /// - [`HarvestError::AuthStateMismatch`] when the state is missing or
    ///   differs, regardless of what else the callback carries
    /// - [`HarvestError::InvalidCallback`] when it carries neither an
    ///   `access_token` nor a `code`
    /// - token endpoint errors for the code grant
    #[instrument(skip(self, callback, expected_state, cancel))]
    pub async fn handle_callback_with_state(
        &self,
        callback: &Url,
        expected_state: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AuthResult> {
        let params = callback_params(callback);

        if !validate_state(expected_state, params.get("state").map(String::as_str)) {
            warn!("OAuth callback state mismatch");
            return Err(HarvestError::AuthStateMismatch);
        }

        let scope = params.get("scope").cloned();

        if let Some(access_token) = params.get("access_token") {
            let expires_in = match params.get("expires_in") {
                Some(raw) => raw.parse::<i64>().map_err(|_| {
                    HarvestError::InvalidCallback(format!("expires_in is not a number: {raw}"))
                })?,
                None => 0,
            };
            info!("completed implicit grant");
            return Ok(AuthResult {
                access_token: access_token.clone(),
                refresh_token: params.get("refresh_token").cloned(),
                token_type: params
                    .get("token_type")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
                expires_in,
                scope,
            });
        }

        if let Some(code) = params.get("code") {
            let token = self.exchange_code(code, cancel).await?;
            info!("completed authorization code grant");
            return Ok(AuthResult::from_token_response(token, scope));
        }

        Err(HarvestError::InvalidCallback(
            "callback carries neither access_token nor code".into(),
        ))
    }

    /// Exchange an authorization code for tokens.
    #[instrument(skip(self, code, cancel))]
    pub async fn exchange_code(
        &self,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<TokenResponse> {
        let secret = self.require_client_secret()?;

        self.token_request()
            .body("code", code)
            .body("client_id", &self.config.client_id)
            .body("client_secret", secret)
            .body("grant_type", "authorization_code")
            .send(&self.http, cancel)
            .await
    }

    /// Trade a refresh token for a new token pair.
    ///
    /// # Errors
    /// Returns [`HarvestError::MissingRefreshToken`] for an empty refresh
    /// token, otherwise token endpoint errors.
    #[instrument(skip(self, refresh_token, cancel))]
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
        cancel: &CancellationToken,
    ) -> Result<AuthResult> {
        if refresh_token.is_empty() {
            return Err(HarvestError::MissingRefreshToken);
        }
        let secret = self.require_client_secret()?;

        let token: TokenResponse = self
            .token_request()
            .body("client_id", &self.config.client_id)
            .body("client_secret", secret)
            .body("grant_type", "refresh_token")
            .body("refresh_token", refresh_token)
            .send(&self.http, cancel)
            .await?;

        info!(expires_in = token.expires_in, "refreshed access token");
        Ok(AuthResult::from_token_response(token, None))
    }

    fn token_request(&self) -> RequestBuilder {
        let request = RequestBuilder::begin(Method::POST, self.config.token_url());
        match &self.config.user_agent {
            Some(agent) => request.user_agent(agent.clone()),
            None => request,
        }
    }

    fn require_client_secret(&self) -> Result<&str> {
        self.config
            .client_secret()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                HarvestError::Config("client_secret is required for token requests".into())
            })
    }
}

impl std::fmt::Debug for OAuthFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthFlow")
            .field("config", &self.config)
            .field("pending", &self.pending_state.lock().is_some())
            .finish()
    }
}

/// Scheme, host, port and path equality; query and fragment are ignored.
#[must_use]
pub fn is_callback_uri(uri: &Url, redirect_uri: &Url) -> bool {
    uri.scheme() == redirect_uri.scheme()
        && uri.host_str() == redirect_uri.host_str()
        && uri.port_or_known_default() == redirect_uri.port_or_known_default()
        && uri.path() == redirect_uri.path()
}

/// Query parameters of the callback, with fragment parameters filling in
/// names the query lacks (implicit grants are often delivered in the
/// fragment).
fn callback_params(callback: &Url) -> HashMap<String, String> {
    let mut params: HashMap<String, String> = callback.query_pairs().into_owned().collect();

    if let Some(fragment) = callback.fragment() {
        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()).into_owned() {
            params.entry(key).or_insert(value);
        }
    }

    params
}
