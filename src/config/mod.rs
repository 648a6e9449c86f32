// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Venice bearer token. Wiped from memory on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Custom Debug impl that never logs the token
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (prefix `SDAPI_VENICE_`, `__` between sections)
    /// 2. Config file (`path`, or `~/.sdapi-venice/config.toml` when present)
    /// 3. Defaults (lowest)
    ///
    /// CLI overrides are applied by the caller afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // e.g. SDAPI_VENICE_SERVER__PORT=9901
            .add_source(
                Environment::with_prefix("SDAPI_VENICE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))
    }

    /// Read the Venice bearer token from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<ApiKey> {
        let name = &self.venice.api_key_env;
        match std::env::var(name) {
            Ok(key) if !key.trim().is_empty() => Ok(ApiKey::new(key.trim())),
            _ => Err(ProxyError::Config(format!(
                "{} is not set; export it or put it in a .env file",
                name
            ))),
        }
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sdapi-venice")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
