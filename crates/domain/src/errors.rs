//! Error types used throughout the client

use thiserror::Error;

/// Main error type for the Harvest client
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Required configuration (client id, redirect URI, user agent, account
    /// id) is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The `state` returned on the OAuth callback does not match the pending
    /// authorization request.
    #[error("Login states don't match")]
    AuthStateMismatch,

    /// The OAuth callback carried neither an access token nor a code.
    #[error("Invalid callback: {0}")]
    InvalidCallback(String),

    /// A refresh was attempted without a refresh token.
    #[error("No refresh token available")]
    MissingRefreshToken,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be built (mixed body modes, array body in form
    /// mode, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-2xx response from the token endpoint or the resource API.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl HarvestError {
    /// HTTP status code carried by [`HarvestError::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for a 401 from the server.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::AuthStateMismatch => "auth_state_mismatch",
            Self::InvalidCallback(_) => "invalid_callback",
            Self::MissingRefreshToken => "missing_refresh_token",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Http { .. } => "http",
            Self::Serialization(_) => "serialization",
            Self::Network(_) => "network",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for HarvestError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidRequest(format!("invalid URL: {err}"))
    }
}

/// Result type alias for Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;
