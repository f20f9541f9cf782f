//! Configuration loader
//!
//! Merges configuration from default values, an optional TOML file, and
//! prefixed environment variables using Figment.

use crate::config::AppConfig;
use crate::logging::parse_log_level;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use prc_domain::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default environment variable prefix
pub const CONFIG_ENV_PREFIX: &str = "PRC";

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix, double underscore separating
    ///    nested keys (e.g. `PRC_RAG__CHUNK_SIZE`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                info!("Configuration loaded from {}", config_path.display());
            } else {
                warn!("Configuration file not found: {}", config_path.display());
            }
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| Error::configuration_with_source("Failed to extract configuration", e))?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    if config.rag.chunk_size == 0 {
        return Err(Error::configuration("Chunk size cannot be 0"));
    }
    if config.rag.chunk_overlap >= config.rag.chunk_size {
        return Err(Error::configuration(
            "Chunk overlap must be smaller than chunk size",
        ));
    }
    if config.rag.top_k == 0 {
        return Err(Error::configuration("top_k cannot be 0"));
    }
    if config.rag.collection_name.trim().is_empty() {
        return Err(Error::configuration("Collection name cannot be empty"));
    }
    if config.research.timeout_secs == 0 {
        return Err(Error::configuration("Research timeout cannot be 0"));
    }
    parse_log_level(&config.logging.level)?;
    Ok(())
}
