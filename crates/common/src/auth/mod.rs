//! OAuth 2.0 against the Harvest identity server
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   OAuthFlow     │  authorize URL, callback, code exchange, refresh
//! └────────┬────────┘
//!          │ AuthResult
//!          ▼
//! ┌─────────────────┐
//! │  TokenSession   │  tokens + expiry, single-flight refresh
//! └────────┬────────┘
//!          │ Authorization: Bearer
//!          ▼
//!     HttpClient
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use harvest_common::auth::{OAuthConfig, OAuthFlow, ResponseType, TokenSession};
//! use harvest_common::http::HttpClient;
//! use tokio_util::sync::CancellationToken;
//! use url::Url;
//!
//! # async fn example() -> harvest_domain::Result<()> {
//! let config = OAuthConfig::new(
//!     "client_id",
//!     Some(Url::parse("http://localhost:5000/callback")?),
//! )
//! .with_client_secret("client_secret")
//! .with_user_agent("MyApp (me@example.com)");
//! let flow = OAuthFlow::new(config)?;
//!
//! let login_url = flow.build_authorization_url(None, None, ResponseType::Code)?;
//! // ... send the user to `login_url`, receive the redirect ...
//! # let callback = login_url;
//!
//! let result = flow.handle_callback(&callback, &CancellationToken::new()).await?;
//! let session = TokenSession::new(HttpClient::new()?);
//! session.authorize_with(&result)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: `OAuthConfig`, `AuthResult`, `ResponseType`
//! - **[`state`]**: anti-forgery state generation and validation
//! - **[`scope`]**: `harvest:<id>` scope parsing
//! - **[`flow`]**: authorization URL, callbacks, code exchange and refresh
//! - **[`token_session`]**: token lifecycle with single-flight refresh
//! - **[`traits`]**: injectable random source

pub mod flow;
pub mod scope;
pub mod state;
pub mod token_session;
pub mod traits;
pub mod types;

// Re-export commonly used types and functions
pub use flow::{is_callback_uri, OAuthFlow};
pub use scope::default_account_id;
pub use state::{generate_state, validate_state, OsRandom};
pub use token_session::{TokenRefreshed, TokenSession};
pub use traits::RandomSource;
pub use types::{AuthResult, OAuthConfig, ResponseType};
