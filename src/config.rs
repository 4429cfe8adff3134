use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::catalog::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_LOCALE};

pub const TOKEN_VAR: &str = "TMDB_ACCESS_TOKEN";
pub const BASE_URL_VAR: &str = "TMDB_BASE_URL";
pub const LOCALE_VAR: &str = "PELIS_LOCALE";
pub const TIMEOUT_VAR: &str = "PELIS_TIMEOUT_SECS";
pub const LOG_FILTER_VAR: &str = "PELIS_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    BaseUrl { var: &'static str, reason: String },

    #[error("{var} must be a whole number of seconds, got {value:?}")]
    Timeout { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub log_filter: String,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(base_url.trim()).map_err(|err| ConfigError::BaseUrl {
            var: BASE_URL_VAR,
            reason: err.to_string(),
        })?;

        let mut catalog = CatalogConfig::new(base_url)
            .with_locale(get(LOCALE_VAR).unwrap_or_else(|| DEFAULT_LOCALE.to_string()));

        if let Some(token) = get(TOKEN_VAR) {
            catalog = catalog.with_access_token(token.trim());
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Timeout {
                var: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            catalog = catalog.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            catalog,
            log_filter: get(LOG_FILTER_VAR).unwrap_or_else(|| "info".to_string()),
            data_dir: dirs::data_local_dir().map(|dir| dir.join("pelis_tui")),
        })
    }

    pub fn has_token(&self) -> bool {
        self.catalog.access_token.is_some()
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("pelis_tui.log"))
    }
}
