//! Service configuration, loaded from TOML.
//!
//! The config file is optional: a missing file yields the defaults and the
//! CLI flags fill in the rest. Parse failures are hard errors. The file may
//! carry the API bearer token, so world-readable permissions are warned
//! about on load.

use serde::{Deserialize, Serialize};

use crate::types::Facet;

/// Top-level service config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Which VTEX store this gateway fronts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// VTEX account name (the `{account}` part of the API host).
    pub account: String,

    /// Host environment segment; the API base becomes
    /// `https://{account}.{environment}.com.br`.
    pub environment: String,

    /// Full base URL override. Takes precedence over account/environment
    /// when set (used for staging hosts and tests).
    pub base_url: Option<String>,

    /// Public storefront origin used when building canonical product URLs.
    /// Defaults to `https://{account}.myvtex.com`.
    pub storefront_base_url: Option<String>,

    /// Locale forwarded to search (e.g. "en-US", "pt-BR").
    pub locale: String,

    /// Currency stamped on normalized offers.
    pub price_currency: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            environment: "vtexcommercestable".to_string(),
            base_url: None,
            storefront_base_url: None,
            locale: "en-US".to_string(),
            price_currency: "BRL".to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolved upstream API base URL.
    pub fn api_base(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}.com.br", self.account, self.environment),
        }
    }

    /// Resolved storefront origin for canonical product URLs.
    pub fn storefront_base(&self) -> String {
        match &self.storefront_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.myvtex.com", self.account),
        }
    }
}

/// Defaults merged into every product search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Facets applied ahead of whatever the caller selects.
    pub default_facets: Vec<Facet>,

    /// Fuzzy matching mode forwarded to the search engine.
    pub fuzzy: String,

    /// Drop out-of-stock items unless the caller says otherwise.
    pub hide_unavailable_items: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_facets: Vec::new(),
            fuzzy: "auto".to_string(),
            hide_unavailable_items: false,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP API.
    pub bind: String,

    /// Origins allowed for CORS. Empty disables the CORS layer.
    pub cors_origins: Vec<String>,

    /// Optional static Bearer token guarding the adapter routes.
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            cors_origins: Vec::new(),
            token: None,
        }
    }
}

/// Errors that can occur when loading config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .0.display(), .1)]
    ReadFailed(std::path::PathBuf, std::io::Error),
    #[error("failed to parse config {}: {}", .0.display(), .1)]
    ParseFailed(std::path::PathBuf, toml::de::Error),
}

impl AppConfig {
    /// Load config from a TOML file path. Returns None if the file doesn't
    /// exist.
    pub fn load(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        check_config_permissions(path);

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseFailed(path.to_path_buf(), e))?;
        Ok(Some(config))
    }
}

/// Warn if a config file that may contain the bearer token is
/// world-readable.
#[cfg(unix)]
fn check_config_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return,
    };

    let mode = metadata.permissions().mode();
    if mode & 0o004 != 0 {
        tracing::warn!(
            "config file {} is world-readable (mode {:o}); it may contain the \
             API token -- consider restricting permissions to 600",
            path.display(),
            mode & 0o7777,
        );
    }
}

#[cfg(not(unix))]
fn check_config_permissions(_path: &std::path::Path) {}
