//! Configuration loading
//!
//! [`HarvestConfig`](harvest_domain::HarvestConfig) itself lives in the
//! domain crate; this module only knows where to find it.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, load_from_lookup, probe_config_paths};
