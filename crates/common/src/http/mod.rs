//! HTTP plumbing shared by the OAuth flow and the endpoint surface
//!
//! - [`client`]: the transport, a `reqwest::Client` carrying the default and
//!   authorization headers
//! - [`query`]: query string encoding
//! - [`params`]: typed parameter values and their wire formatting
//! - [`request`]: the per-request builder that accumulates query, headers and
//!   body, then sends and decodes

pub mod client;
pub mod params;
pub mod query;
pub mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use params::{IntoParam, Param};
pub use request::{BodyMode, RequestBuilder};
