//! Client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_ID_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Configuration for a Harvest client.
///
/// Everything except the two base URLs is optional: an access-token-only
/// client needs `access_token` and `user_agent`, an OAuth client needs
/// `client_id`, `client_secret` and `redirect_uri`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Resource API base, without the `/v2` prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Identity server base used for OAuth and account listing
    #[serde(default = "default_id_base_url")]
    pub id_base_url: String,

    /// `User-Agent` sent with every request. Harvest rejects requests
    /// without one.
    pub user_agent: Option<String>,

    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,

    /// Account used when a call does not name one explicitly
    pub default_account_id: Option<i64>,

    /// Personal access token for sessions without an OAuth client
    pub access_token: Option<String>,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_id_base_url() -> String {
    DEFAULT_ID_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            id_base_url: default_id_base_url(),
            user_agent: None,
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            default_account_id: None,
            access_token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("api_base_url", &self.api_base_url)
            .field("id_base_url", &self.id_base_url)
            .field("user_agent", &self.user_agent)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri)
            .field("default_account_id", &self.default_account_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
