use shared_types::AppConfig;
use std::sync::OnceLock;
use tracing::{info, warn};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "config.toml";

/// Resolve the client configuration once and return it.
///
/// Sources, lowest precedence first: built-in defaults, `config.toml`,
/// then the `POLLS_API_URL` / `POLLS_API_TOKEN` environment variables
/// (a `.env` file is honoured). Web builds have no filesystem and only
/// see a `POLLS_API_URL` baked in at compile time.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let mut config = read_config_file();
        apply_env_overrides(&mut config);
        info!(
            base_url = %config.api.base_url,
            stale_secs = config.cache.stale_secs,
            max_pages = config.cache.max_pages,
            "polls client configured"
        );
        config
    })
}

/// Parse config file contents, falling back to defaults on error.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        warn!(error = %e, "failed to parse config, using defaults");
        AppConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_file() -> AppConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(e) => {
            warn!(path = CONFIG_PATH, error = %e, "config file not readable, using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_file() -> AppConfig {
    AppConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_env_overrides(config: &mut AppConfig) {
    let _ = dotenvy::dotenv();
    apply_overrides(
        config,
        std::env::var("POLLS_API_URL").ok(),
        std::env::var("POLLS_API_TOKEN").ok(),
    );
}

#[cfg(target_arch = "wasm32")]
fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(config, option_env!("POLLS_API_URL").map(str::to_string), None);
}

fn apply_overrides(config: &mut AppConfig, base_url: Option<String>, token: Option<String>) {
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        config.api.access_token = Some(token);
    }
}
