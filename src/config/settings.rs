//! User settings for the envelope planner
//!
//! Holds display preferences and the explicit application state that the
//! original web UI kept in globals: which year and month are selected, and
//! which cloud identity (if any) is signed in.

use std::path::PathBuf;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::paths::EnvelopePaths;
use crate::error::EnvelopeError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Selected budget year
    #[serde(default = "default_year")]
    pub active_year: i32,

    /// Selected month index (0 = January)
    #[serde(default = "default_month")]
    pub active_month: usize,

    /// Quiet period before a local change is pushed to the cloud
    #[serde(default = "default_sync_debounce_ms")]
    pub sync_debounce_ms: u64,

    /// Identifier of the signed-in cloud session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_identifier: Option<String>,

    /// Override for the cloud mirror directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_dir: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_year() -> i32 {
    chrono::Local::now().date_naive().year()
}

fn default_month() -> usize {
    chrono::Local::now().date_naive().month0() as usize
}

fn default_sync_debounce_ms() -> u64 {
    1500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            active_year: default_year(),
            active_month: default_month(),
            sync_debounce_ms: default_sync_debounce_ms(),
            cloud_identifier: None,
            cloud_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &EnvelopePaths) -> Result<Self, EnvelopeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnvelopeError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EnvelopeError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            if settings.active_month > 11 {
                settings.active_month = 0;
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnvelopePaths) -> Result<(), EnvelopeError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            EnvelopeError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            EnvelopeError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Where the directory-backed cloud lives
    pub fn cloud_dir(&self, paths: &EnvelopePaths) -> PathBuf {
        self.cloud_dir.clone().unwrap_or_else(|| paths.cloud_dir())
    }

    pub fn sync_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.sync_debounce_ms)
    }
}
