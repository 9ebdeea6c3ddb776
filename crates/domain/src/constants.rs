//! Wire constants
//!
//! Endpoint paths, header names and formatting strings shared by the request
//! builder, the OAuth flow and the endpoint surface.

// Hosts
pub const DEFAULT_API_BASE_URL: &str = "https://api.harvestapp.com";
pub const DEFAULT_ID_BASE_URL: &str = "https://id.getharvest.com";

// Identity server paths
pub const AUTHORIZE_PATH: &str = "/oauth2/authorize";
pub const TOKEN_PATH: &str = "/api/v1/oauth2/token";
pub const ACCOUNTS_PATH: &str = "/api/v1/accounts";

// Resource API prefix
pub const API_VERSION_PREFIX: &str = "/v2";

// Headers
pub const ACCOUNT_ID_HEADER: &str = "Harvest-Account-Id";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

// chrono format strings
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

// OAuth
pub const STATE_BYTES: usize = 32;
pub const HARVEST_SCOPE_PREFIX: &str = "harvest:";

// Transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
