//! # Harvest Domain
//!
//! Wire records, error taxonomy and configuration for the Harvest client.
//!
//! This crate contains:
//! - Typed records returned by the Harvest v2 API (time entries, projects,
//!   tasks, clients, users, accounts, assignments)
//! - The [`HarvestError`] taxonomy and [`Result`] alias
//! - Client configuration ([`HarvestConfig`])
//! - Endpoint, header and wire-format constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No HTTP or runtime dependencies; only serde/chrono/thiserror/url
//! - Wire names are snake_case and map 1:1 to field names

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
