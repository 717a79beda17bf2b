//! Configuration and data directory management.
//!
//! The rating database lives in the platform data directory
//! (`~/.local/share/unrandom/ratings.db` on Linux, the equivalent on macOS
//! and Windows). An optional JSON config file in the platform config
//! directory can override the database location, the recognized file
//! extensions, and the tier weight table. No config file means defaults;
//! a config file that cannot be parsed or validated is an error rather
//! than a silent fallback.

use crate::algorithm::TierWeights;
use crate::scan::DEFAULT_EXTENSIONS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Platform-appropriate path of the rating database, creating the data
/// directory on demand.
///
/// # Errors
///
/// The platform has no data directory, or it cannot be created.
pub fn get_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine the system data directory"))?;

    let app_dir = data_dir.join("unrandom");
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("failed to create data directory {}", app_dir.display()))?;

    Ok(app_dir.join("ratings.db"))
}

/// Platform-appropriate path of the optional config file.
fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine the system config directory"))?;
    Ok(config_dir.join("unrandom/config.json"))
}

/// Runtime configuration, merged from defaults and the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the rating database location.
    pub db_path: Option<PathBuf>,
    /// File extensions recognized by the scanner, without the leading dot.
    pub extensions: Vec<String>,
    /// Weight per rating value. Higher weight, more frequent selection.
    pub tier_weights: BTreeMap<u32, u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            extensions: DEFAULT_EXTENSIONS.clone(),
            tier_weights: TierWeights::default().tiers().collect(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when there is none.
    ///
    /// # Errors
    ///
    /// Unreadable or unparseable config file, or one that fails
    /// validation (empty tier table, zero weight, empty extension set).
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        let config = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("malformed config file {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config file {}", path.display()))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the selector cannot work with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.tier_weights.is_empty(), "tier_weights must not be empty");
        for (rating, weight) in &self.tier_weights {
            anyhow::ensure!(*rating >= 1, "rating values start at 1, got {rating}");
            anyhow::ensure!(*weight >= 1, "weight for rating {rating} must be positive");
        }
        anyhow::ensure!(!self.extensions.is_empty(), "extensions must not be empty");
        Ok(())
    }

    #[must_use]
    pub fn weights(&self) -> TierWeights {
        TierWeights::new(self.tier_weights.clone())
    }

    /// The database path to use: the configured override, or the platform
    /// default.
    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => get_db_path(),
        }
    }
}
