//! Configuration loading
//!
//! Two-layer resolution:
//! 1. An override file (`--config`, else ~/.config/spendcast/config.toml)
//! 2. Embedded defaults (compiled into the binary)
//!
//! Keys missing from the override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::analytics::MAX_HORIZON;
use crate::error::{Error, Result};
use crate::models::Category;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendcast.toml");

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Months to forecast
    pub forecast_horizon: usize,
    /// Period selector used when none is given
    pub default_period: String,
    /// Suggested category labels
    pub category_labels: Vec<String>,
    /// Override file that was read, if any
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("spendcast.db"),
            forecast_horizon: 3,
            default_period: "all".to_string(),
            category_labels: Category::presets()
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            source: None,
        }
    }
}

impl Settings {
    /// Load defaults, then apply the override file if it exists
    ///
    /// An explicit `override_path` that does not exist is an error; the
    /// implicit per-user path is simply skipped when missing.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut settings = parse_config(DEFAULT_CONFIG, Settings::default())?;

        let path = match override_path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = path {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            settings = parse_config(&content, settings)?;
            debug!("Loaded config override from {}", path.display());
            settings.source = Some(path);
        }

        Ok(settings)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spendcast").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: Option<RawDatabase>,
    forecast: Option<RawForecast>,
    filters: Option<RawFilters>,
    categories: Option<RawCategories>,
}

#[derive(Debug, Deserialize)]
struct RawDatabase {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    horizon: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawFilters {
    default_period: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    labels: Option<Vec<String>>,
}

/// Parse TOML content on top of `base`
fn parse_config(content: &str, base: Settings) -> Result<Settings> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut settings = base;

    if let Some(path) = raw.database.and_then(|d| d.path) {
        settings.database_path = path;
    }

    if let Some(horizon) = raw.forecast.and_then(|f| f.horizon) {
        if horizon == 0 || horizon > MAX_HORIZON {
            return Err(Error::Config(format!(
                "forecast.horizon must be between 1 and {}, got {}",
                MAX_HORIZON, horizon
            )));
        }
        settings.forecast_horizon = horizon;
    }

    if let Some(period) = raw.filters.and_then(|f| f.default_period) {
        settings.default_period = period;
    }

    if let Some(labels) = raw.categories.and_then(|c| c.labels) {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if !labels.is_empty() {
            settings.category_labels = labels;
        }
    }

    Ok(settings)
}
