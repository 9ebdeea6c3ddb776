//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `HARVEST_USER_AGENT` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `HARVEST_USER_AGENT`: `User-Agent` header (required)
//! - `HARVEST_CLIENT_ID`: OAuth client id
//! - `HARVEST_CLIENT_SECRET`: OAuth client secret
//! - `HARVEST_REDIRECT_URI`: OAuth redirect URI
//! - `HARVEST_ACCOUNT_ID`: Default account id
//! - `HARVEST_ACCESS_TOKEN`: Personal access token
//! - `HARVEST_API_BASE_URL`: Resource API base (default
//!   `https://api.harvestapp.com`)
//! - `HARVEST_ID_BASE_URL`: Identity server base (default
//!   `https://id.getharvest.com`)
//! - `HARVEST_TIMEOUT_SECS`: Transport timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./harvest.toml` or `./harvest.json` (current working directory)
//! 2. `../harvest.toml` or `../harvest.json` (parent directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use harvest_domain::{HarvestConfig, HarvestError, Result};

const FILE_NAMES: [&str; 2] = ["harvest.toml", "harvest.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing or a value is invalid, falls back to a config file.
///
/// # Errors
/// Returns `HarvestError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<HarvestConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from the process environment
///
/// # Errors
/// Returns `HarvestError::Config` if `HARVEST_USER_AGENT` is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<HarvestConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup
///
/// `lookup` returns the value of a variable or `None` when it is unset.
/// Empty values count as unset.
///
/// # Errors
/// Same as [`load_from_env`].
pub fn load_from_lookup<F>(lookup: F) -> Result<HarvestConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let user_agent = var("HARVEST_USER_AGENT").ok_or_else(|| {
        HarvestError::Config("Missing required environment variable: HARVEST_USER_AGENT".into())
    })?;

    let default_account_id = var("HARVEST_ACCOUNT_ID")
        .map(|s| {
            s.trim()
                .parse::<i64>()
                .map_err(|e| HarvestError::Config(format!("Invalid account id: {}", e)))
        })
        .transpose()?;

    let mut config = HarvestConfig {
        user_agent: Some(user_agent),
        client_id: var("HARVEST_CLIENT_ID"),
        client_secret: var("HARVEST_CLIENT_SECRET"),
        redirect_uri: var("HARVEST_REDIRECT_URI"),
        default_account_id,
        access_token: var("HARVEST_ACCESS_TOKEN"),
        ..HarvestConfig::default()
    };

    if let Some(base) = var("HARVEST_API_BASE_URL") {
        config.api_base_url = base;
    }
    if let Some(base) = var("HARVEST_ID_BASE_URL") {
        config.id_base_url = base;
    }
    if let Some(timeout) = var("HARVEST_TIMEOUT_SECS") {
        config.timeout_seconds = timeout
            .trim()
            .parse::<u64>()
            .map_err(|e| HarvestError::Config(format!("Invalid timeout: {}", e)))?;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected
/// by extension.
///
/// # Errors
/// Returns `HarvestError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<HarvestConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HarvestError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HarvestError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HarvestError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<HarvestConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HarvestError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HarvestError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(HarvestError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard locations for a config file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_lookup_all_vars_set() {
        let config = load_from_lookup(lookup(&[
            ("HARVEST_USER_AGENT", "MyApp (me@example.com)"),
            ("HARVEST_CLIENT_ID", "client"),
            ("HARVEST_CLIENT_SECRET", "secret"),
            ("HARVEST_REDIRECT_URI", "http://localhost:5000/cb"),
            ("HARVEST_ACCOUNT_ID", "1176282"),
            ("HARVEST_ACCESS_TOKEN", "token"),
            ("HARVEST_API_BASE_URL", "http://localhost:9000"),
            ("HARVEST_ID_BASE_URL", "http://localhost:9001"),
            ("HARVEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.user_agent.as_deref(), Some("MyApp (me@example.com)"));
        assert_eq!(config.client_id.as_deref(), Some("client"));
        assert_eq!(config.client_secret.as_deref(), Some("secret"));
        assert_eq!(config.redirect_uri.as_deref(), Some("http://localhost:5000/cb"));
        assert_eq!(config.default_account_id, Some(1176282));
        assert_eq!(config.access_token.as_deref(), Some("token"));
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.id_base_url, "http://localhost:9001");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_lookup_defaults() {
        let config = load_from_lookup(lookup(&[("HARVEST_USER_AGENT", "MyApp")])).unwrap();
        assert_eq!(
            config,
            HarvestConfig { user_agent: Some("MyApp".into()), ..Default::default() }
        );
    }

    #[test]
    fn test_lookup_missing_user_agent() {
        let err = load_from_lookup(lookup(&[("HARVEST_CLIENT_ID", "client")])).unwrap_err();
        assert!(matches!(err, HarvestError::Config(msg) if msg.contains("HARVEST_USER_AGENT")));
    }

    #[test]
    fn test_lookup_empty_values_are_unset() {
        let config = load_from_lookup(lookup(&[
            ("HARVEST_USER_AGENT", "MyApp"),
            ("HARVEST_CLIENT_ID", ""),
            ("HARVEST_ACCOUNT_ID", "  "),
        ]))
        .unwrap();
        assert!(config.client_id.is_none());
        assert!(config.default_account_id.is_none());
    }

    #[test]
    fn test_lookup_invalid_account_id() {
        let err = load_from_lookup(lookup(&[
            ("HARVEST_USER_AGENT", "MyApp"),
            ("HARVEST_ACCOUNT_ID", "not-a-number"),
        ]))
        .unwrap_err();
        assert!(matches!(err, HarvestError::Config(_)));
    }

    #[test]
    fn test_parse_config_rejects_unknown_extension() {
        let err = parse_config("", Path::new("harvest.yaml")).unwrap_err();
        assert!(matches!(err, HarvestError::Config(msg) if msg.contains("yaml")));
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let err = parse_config("user_agent = ", Path::new("harvest.toml")).unwrap_err();
        assert!(matches!(err, HarvestError::Config(msg) if msg.contains("TOML")));
    }
}
