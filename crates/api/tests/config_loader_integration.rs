//! Integration tests for config file loading

use std::io::Write;

use harvest_api::config::load_from_file;
use harvest_api::{HarvestConfig, HarvestError};
use harvest_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use tempfile::Builder;

fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().prefix("harvest").suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
user_agent = "MyApp (me@example.com)"
client_id = "client-123"
client_secret = "secret-456"
redirect_uri = "http://localhost:5000/harvest/callback"
default_account_id = 1176282
timeout_seconds = 10
"#,
    );

    let config = load_from_file(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(config.user_agent.as_deref(), Some("MyApp (me@example.com)"));
    assert_eq!(config.client_id.as_deref(), Some("client-123"));
    assert_eq!(config.default_account_id, Some(1176282));
    assert_eq!(config.timeout_seconds, 10);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{"user_agent": "MyApp", "access_token": "token", "api_base_url": "http://localhost:9"}"#,
    );

    let config = load_from_file(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(
        config,
        HarvestConfig {
            user_agent: Some("MyApp".into()),
            access_token: Some("token".into()),
            api_base_url: "http://localhost:9".into(),
            ..HarvestConfig::default()
        }
    );
    assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_file(Some(dir.path().join("harvest.toml"))).unwrap_err();
    assert!(matches!(err, HarvestError::Config(msg) if msg.contains("not found")));
}

#[test]
fn test_malformed_json_is_config_error() {
    let file = write_config(".json", "{ not json");
    let err = load_from_file(Some(file.path().to_path_buf())).unwrap_err();
    assert!(matches!(err, HarvestError::Config(msg) if msg.contains("JSON")));
}

#[test]
fn test_loaded_config_builds_client() {
    let file = write_config(".toml", "user_agent = \"MyApp\"\naccess_token = \"token\"\n");
    let config = load_from_file(Some(file.path().to_path_buf())).unwrap();

    let client = harvest_api::HarvestClient::new(config).unwrap();
    assert!(client.session().is_authenticated());
}
