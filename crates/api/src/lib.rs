//! # Harvest API
//!
//! Typed async client for the Harvest v2 time-tracking API.
//!
//! ## Modules
//! - [`client`]: [`HarvestClient`], which owns the transport, the token
//!   session and the optional OAuth flow
//! - [`endpoints`]: one module per resource, each adding methods to
//!   [`HarvestClient`]
//! - [`config`]: loading [`HarvestConfig`] from the environment or a file
//! - [`logging`]: tracing subscriber setup and per-call logging
//!
//! ## Example
//! ```no_run
//! use harvest_api::{HarvestClient, TimeEntryFilter};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> harvest_api::Result<()> {
//! harvest_api::logging::init();
//! let client = HarvestClient::new(harvest_api::config::load()?)?;
//! let cancel = CancellationToken::new();
//! let entries = client.list_time_entries(&TimeEntryFilter::default(), None, &cancel).await?;
//! println!("{} entries", entries.time_entries.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod logging;

pub use client::HarvestClient;
pub use endpoints::{NewTimeEntry, NewUser, PageParams, TimeEntryFilter, TimeEntryUpdate};
pub use harvest_common::auth::{AuthResult, ResponseType, TokenRefreshed};
pub use harvest_domain::{HarvestConfig, HarvestError, Result};
