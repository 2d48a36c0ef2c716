//! Runtime configuration.
//!
//! Read from a TOML file, then overridden by environment variables:
//!
//! ```toml
//! api_url = "https://shop.example.com/api"
//! products_file = "fixtures/products.json"
//! log_file = "/tmp/rayna.log"
//! log_level = "debug"
//! tick_rate_ms = 250
//! ```
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `RAYNA_CONFIG` | path of the TOML file to load |
//! | `RAYNA_API_URL` | replaces `api_url` |
//! | `RAYNA_PRODUCTS_FILE` | replaces `products_file` |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::client::StoreClient;
use crate::error::{Result, StoreError};
use crate::source::{ProductSource, StaticProductSource};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Storefront API root; products are read from `{api_url}/products`.
    pub api_url: String,
    /// JSON fixture used instead of the API when set.
    pub products_file: Option<PathBuf>,
    /// Logging is off unless a file is given; the terminal belongs to the UI.
    pub log_file: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Input poll interval.
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            products_file: None,
            log_file: None,
            log_level: "info".to_string(),
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from `RAYNA_CONFIG` (or defaults) and apply env overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match var("RAYNA_CONFIG") {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(url) = var("RAYNA_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(file) = var("RAYNA_PRODUCTS_FILE").filter(|f| !f.trim().is_empty()) {
            config.products_file = Some(PathBuf::from(file));
        }
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Fixture file when configured, otherwise the HTTP API.
    pub fn product_source(&self) -> Result<Box<dyn ProductSource>> {
        match self.products_file {
            Some(ref path) => Ok(Box::new(StaticProductSource::from_file(path)?)),
            None => Ok(Box::new(StoreClient::new(&self.api_url)?)),
        }
    }
}
