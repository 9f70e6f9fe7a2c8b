//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default OMDb endpoint.
pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["OMDB_API_KEY", "NEXT_PUBLIC_OMDB_API_KEY"];

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// OMDb configuration.
    #[serde(default)]
    pub omdb: OmdbSettings,
}

/// OMDb configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbSettings {
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Service endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

impl Default for OmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Resolve the API key: flag, then environment, then config file.
    ///
    /// Blank values at any level are skipped.
    pub fn resolve_api_key(&self, flag: Option<&str>, env: &[Option<String>]) -> Option<String> {
        flag.map(str::to_string)
            .into_iter()
            .chain(env.iter().cloned().flatten())
            .chain(self.omdb.api_key.clone())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }
}

/// Read the API key environment variables in lookup order.
pub fn api_key_from_env() -> Vec<Option<String>> {
    API_KEY_ENV_VARS
        .iter()
        .map(|name| std::env::var(name).ok())
        .collect()
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_explorer")
}

/// Load configuration from the default location.
pub fn load_config() -> Config {
    load_config_from(&dirs_config_path().join("config.toml"))
}

/// Load configuration from `path`, falling back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid config {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
        }
    }

    Config::default()
}
