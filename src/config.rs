use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.jina.ai/v1/embeddings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    9000
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_api_key_env() -> String {
    "JINA_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file.
    /// Priority: CLI arg > CWD > XDG config > home dir > built-in defaults
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(&candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Resolve the upstream API key from the configured environment variable.
    /// An unset or blank variable is fatal at startup.
    pub fn resolve_api_key(&self) -> Result<String> {
        match std::env::var(&self.upstream.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(RelayError::MissingCredential {
                env: self.upstream.api_key_env.clone(),
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.upstream.url;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(RelayError::config(format!(
                "upstream.url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(RelayError::config("upstream.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("embed-relay.toml"));

    if cfg!(target_os = "macos") {
        if let Some(home) = home_dir() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("embed-relay")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("embed-relay").join("config.toml"));
        }
        if let Some(home) = home_dir() {
            paths.push(home.join(".config").join("embed-relay").join("config.toml"));
        }
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".embed-relay.toml"));
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
