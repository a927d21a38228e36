//! Path management for the envelope planner
//!
//! Provides path resolution for configuration, year snapshots, the local cloud
//! mirror and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `ENVELOPE_PLANNER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories` plus `envelope-planner`
//!    (`~/.config/envelope-planner` on Linux)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::EnvelopeError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "ENVELOPE_PLANNER_DATA_DIR";

/// Manages all paths used by the envelope planner
#[derive(Debug, Clone)]
pub struct EnvelopePaths {
    /// Base directory for all data
    base_dir: PathBuf,
}

impl EnvelopePaths {
    /// Create a new EnvelopePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, EnvelopeError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create EnvelopePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one snapshot file per year
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default location of the directory-backed cloud mirror
    pub fn cloud_dir(&self) -> PathBuf {
        self.base_dir.join("cloud")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Snapshot file for one year (`data/year-2025.json`)
    pub fn year_file(&self, year: i32) -> PathBuf {
        self.data_dir().join(format!("year-{}.json", year))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), EnvelopeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnvelopeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| EnvelopeError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, EnvelopeError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| EnvelopeError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("envelope-planner"))
}
