//! OAuth types
//!
//! Configuration for the Harvest identity server and the token result handed
//! back by every grant.

use std::fmt;

use harvest_domain::constants::{
    AUTHORIZE_PATH, DEFAULT_ID_BASE_URL, DEFAULT_TOKEN_TYPE, TOKEN_PATH,
};
use harvest_domain::{HarvestConfig, HarvestError, Result, TokenResponse};
use url::Url;

use super::scope;

/// `response_type` requested on the authorize URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Authorization code grant; the code is exchanged server-to-server.
    #[default]
    Code,
    /// Implicit grant; the access token arrives on the callback.
    Token,
}

impl ResponseType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth client registration plus identity server location.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Identity server base, e.g. `https://id.getharvest.com`
    pub id_base_url: String,

    pub client_id: String,

    /// Required for the code exchange and for refresh, not for building the
    /// authorize URL or the implicit grant.
    pub client_secret: Option<String>,

    /// Where the identity server redirects after login
    pub redirect_uri: Option<Url>,

    /// `User-Agent` sent to the token endpoint
    pub user_agent: Option<String>,
}

impl OAuthConfig {
    /// Create a configuration against the production identity server.
    #[must_use]
    pub fn new(client_id: impl Into<String>, redirect_uri: Option<Url>) -> Self {
        Self {
            id_base_url: DEFAULT_ID_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri,
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn with_id_base_url(mut self, base: impl Into<String>) -> Self {
        self.id_base_url = base.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the OAuth part of a [`HarvestConfig`].
    ///
    /// # Errors
    /// Returns [`HarvestError::Config`] when no client id is configured or
    /// the redirect URI does not parse.
    pub fn from_harvest_config(config: &HarvestConfig) -> Result<Self> {
        let client_id = config
            .client_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| HarvestError::Config("client_id is not configured".to_string()))?;

        let redirect_uri = config
            .redirect_uri
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|err| HarvestError::Config(format!("invalid redirect_uri: {err}")))?;

        Ok(Self {
            id_base_url: config.id_base_url.clone(),
            client_id,
            client_secret: config.client_secret.clone(),
            redirect_uri,
            user_agent: config.user_agent.clone(),
        })
    }

    /// `{id_base}/oauth2/authorize`
    #[must_use]
    pub fn authorization_url(&self) -> String {
        format!("{}{AUTHORIZE_PATH}", self.id_base_url.trim_end_matches('/'))
    }

    /// `{id_base}/api/v1/oauth2/token`
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{TOKEN_PATH}", self.id_base_url.trim_end_matches('/'))
    }

    #[must_use]
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("id_base_url", &self.id_base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri.as_ref().map(Url::as_str))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Tokens obtained from a callback, a code exchange or a refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// Lifetime in seconds; 0 means already expired.
    pub expires_in: i64,
    /// Granted scope, when the callback carried one
    pub scope: Option<String>,
}

impl AuthResult {
    /// Combine a token endpoint response with the scope from the callback.
    #[must_use]
    pub fn from_token_response(response: TokenResponse, scope: Option<String>) -> Self {
        let token_type = if response.token_type.is_empty() {
            DEFAULT_TOKEN_TYPE.to_string()
        } else {
            response.token_type
        };

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type,
            expires_in: response.expires_in,
            scope,
        }
    }

    /// Account id implied by a scope that grants exactly one Harvest account.
    #[must_use]
    pub fn default_account_id(&self) -> Option<i64> {
        scope::default_account_id(self.scope.as_deref())
    }
}

impl fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResult")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}
