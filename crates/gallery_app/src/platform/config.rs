//! RON configuration for the terminal front end.
//!
//! Every field has a default, so an empty file (or no file) gives the stock
//! Art Institute of Chicago setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gallery_core::{SearchPolicy, DEFAULT_IIIF_BASE};
use gallery_engine::CatalogSettings;
use gallery_logging::{gallery_info, LogSettings};
use log::LevelFilter;
use serde::Deserialize;

use super::cli::{Cli, LogTarget};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    Level(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub iiif_base: String,
    pub page_size: u32,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let settings = CatalogSettings::default();
        Self {
            base_url: settings.base_url,
            iiif_base: DEFAULT_IIIF_BASE.to_string(),
            page_size: settings.page_size,
            connect_timeout_ms: millis(settings.connect_timeout),
            read_timeout_ms: millis(settings.read_timeout),
            request_timeout_ms: millis(settings.request_timeout),
            max_bytes: settings.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let policy = SearchPolicy::default();
        Self {
            debounce_ms: millis(policy.debounce),
            min_query_len: policy.min_query_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogTarget,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::File,
            level: "info".to_string(),
            file: LogSettings::default().file,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        gallery_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads the file named on the command line and applies flag overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::load(cli.config.as_deref())?;
        if let Some(base_url) = &cli.base_url {
            config.catalog.base_url = base_url.clone();
        }
        if let Some(target) = cli.log {
            config.log.destination = target;
        }
        Ok(config)
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.catalog.base_url.clone(),
            page_size: self.catalog.page_size,
            connect_timeout: Duration::from_millis(self.catalog.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.catalog.read_timeout_ms),
            request_timeout: Duration::from_millis(self.catalog.request_timeout_ms),
            max_bytes: self.catalog.max_bytes,
        }
    }

    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            debounce: Duration::from_millis(self.search.debounce_ms),
            min_query_len: self.search.min_query_len,
        }
    }

    pub fn log_settings(&self) -> Result<LogSettings, ConfigError> {
        let level = self
            .log
            .level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::Level(self.log.level.clone()))?;
        Ok(LogSettings {
            destination: self.log.destination.into(),
            level,
            file: self.log.file.clone(),
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
