//! Transport and OAuth plumbing for the Harvest client.
//!
//! - [`http`]: the shared transport and the per-request builder
//! - [`auth`]: OAuth flow and token session
//!
//! Records, errors and configuration live in `harvest-domain`; the endpoint
//! surface lives in `harvest-api`.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod http;

pub use auth::{AuthResult, OAuthConfig, OAuthFlow, ResponseType, TokenRefreshed, TokenSession};
pub use http::{BodyMode, HttpClient, IntoParam, Param, RequestBuilder};
