//! Tracing setup and structured call logging

use std::time::Duration;

use harvest_domain::HarvestError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Uses `try_init`, so calling it more than once (e.g. from tests) is
/// harmless.
pub fn init() {
    init_with(None, false);
}

/// Install a fmt subscriber with an explicit filter directive, optionally
/// emitting JSON lines.
pub fn init_with(filter: Option<&str>, json: bool) {
    use tracing_subscriber::fmt;

    let filter = match filter {
        Some(directive) => EnvFilter::try_new(directive).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let result = if json {
        fmt::fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt::fmt().with_env_filter(filter).try_init()
    };
    drop(result);
}

/// Log the outcome of an endpoint call with structured fields.
///
/// `endpoint` is a stable identifier such as `"time_entries::list"`; it must
/// not carry ids or tokens.
#[inline]
pub fn log_api_call(endpoint: &str, elapsed: Duration, error: Option<&HarvestError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(endpoint, duration_ms, "api_call_success"),
        Some(err) => warn!(
            endpoint,
            duration_ms,
            error_type = err.label(),
            status = err.status(),
            "api_call_failure"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_with(Some("debug"), false);
        init();
        init_with(Some("not a [valid filter"), true);
    }

    #[test]
    fn test_log_api_call_accepts_both_outcomes() {
        log_api_call("tasks::list", Duration::from_millis(12), None);
        log_api_call(
            "tasks::list",
            Duration::from_millis(12),
            Some(&HarvestError::Http { status: 404, reason: "Not Found".into() }),
        );
    }
}
