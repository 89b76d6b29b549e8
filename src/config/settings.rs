//! Application settings loaded from `config.toml`.
//!
//! The file is optional. Every key has a default, so a missing file behaves
//! like an empty one. Dates inside `[[seed.applications]]` are written as
//! quoted `YYYY-MM-DD` strings.

use crate::config::seed::default_sample_applications;
use crate::core::store::NewApplication;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file used when `JOB_TRACKER_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database URL; `DATABASE_URL` in the environment takes precedence
    pub database_url: Option<String>,
    /// First-run sample data
    pub seed: SeedConfig,
}

/// The `[seed]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert sample rows into an empty store on startup
    pub enabled: bool,
    /// Custom sample rows; the built-in samples are used when empty
    pub applications: Vec<NewApplication>,
}

impl SeedConfig {
    /// Rows to insert when seeding.
    #[must_use]
    pub fn samples(&self) -> Vec<NewApplication> {
        if self.applications.is_empty() {
            default_sample_applications()
        } else {
            self.applications.clone()
        }
    }
}

/// Path of the config file, honoring `JOB_TRACKER_CONFIG`.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("JOB_TRACKER_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Parses settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Loads settings from `path`. The file must exist.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads settings from `path`, falling back to defaults when the file is absent.
///
/// A file that exists but cannot be parsed is still an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    load_config(path)
}

/// Loads the application configuration from [`config_path`].
pub fn load_app_configuration() -> Result<AppConfig> {
    let config = load_config_or_default(config_path())?;
    info!(
        seed_enabled = config.seed.enabled,
        custom_samples = config.seed.applications.len(),
        "Configuration loaded"
    );
    Ok(config)
}
