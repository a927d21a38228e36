//! Configuration module for the envelope planner
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Selected year/month and cloud session state

pub mod paths;
pub mod settings;

pub use paths::EnvelopePaths;
pub use settings::Settings;
