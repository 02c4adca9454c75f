use serde::{Deserialize, Serialize};

/// Connection settings for the polls backend.
///
/// Every field has a default so that a missing or partial `[api]` table
/// still yields a usable client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token forwarded on every request when set.
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            access_token: None,
        }
    }
}

/// Page cache tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheSettings {
    /// Seconds a fetched page counts as fresh before it is refetched on access.
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    /// Maximum number of settled pages kept in memory.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            max_pages: default_max_pages(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_stale_secs() -> u64 {
    30
}

fn default_max_pages() -> usize {
    20
}
