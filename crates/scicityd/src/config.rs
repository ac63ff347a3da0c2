//! Daemon configuration.
//!
//! Loaded from `scicity.toml` (path overridable via `SCICITY_CONFIG`).
//! Every field has a default so a missing or partial file still yields a
//! runnable daemon; a `GEMINI_API_KEY` environment variable is appended to
//! the configured key list when present.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const CONFIG_ENV: &str = "SCICITY_CONFIG";
const CONFIG_FILE: &str = "scicity.toml";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// JSON file holding the venue record.
    #[serde(default = "default_venue_data_file")]
    pub venue_data_file: PathBuf,

    /// Ordered Gemini API key pool.
    #[serde(default)]
    pub api_keys: Vec<String>,

    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Classified errors on a key before rotating away from it.
    #[serde(default = "default_max_errors_per_key")]
    pub max_errors_per_key: u64,

    /// Requests on a key before rotating proactively.
    #[serde(default = "default_max_requests_per_key")]
    pub max_requests_per_key: u64,

    /// Idle seconds before a session is discarded.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Maximum number of live sessions.
    #[serde(default = "default_session_capacity")]
    pub session_capacity: usize,
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_venue_data_file() -> PathBuf {
    PathBuf::from("data/science_city_data.json")
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_errors_per_key() -> u64 {
    5
}

fn default_max_requests_per_key() -> u64 {
    1000
}

fn default_session_ttl_secs() -> u64 {
    3600 // 1 hour idle timeout
}

fn default_session_capacity() -> usize {
    1024
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            venue_data_file: default_venue_data_file(),
            api_keys: Vec::new(),
            model: default_model(),
            max_errors_per_key: default_max_errors_per_key(),
            max_requests_per_key: default_max_requests_per_key(),
            session_ttl_secs: default_session_ttl_secs(),
            session_capacity: default_session_capacity(),
        }
    }
}

impl GuideConfig {
    /// Load configuration, falling back to defaults on any failure.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());

        let mut config = match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<GuideConfig>(&raw) {
                Ok(config) => {
                    info!("loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    warn!("invalid configuration in {}: {}, using defaults", path, e);
                    GuideConfig::default()
                }
            },
            Err(_) => {
                warn!("no configuration file at {}, using defaults", path);
                GuideConfig::default()
            }
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_keys.push(key);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_limits() {
        let config = GuideConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:5000");
        assert_eq!(config.max_errors_per_key, 5);
        assert_eq!(config.max_requests_per_key, 1000);
        assert_eq!(config.session_ttl_secs, 3600);
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: GuideConfig = toml::from_str(
            r#"
            listen_addr = "0.0.0.0:8080"
            api_keys = ["abc", "def"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.api_keys.len(), 2);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.session_capacity, 1024);
    }
}
