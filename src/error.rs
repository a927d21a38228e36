//! Custom error types for the envelope planner
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The ledger itself never returns these:
//! ledger operations are total and no-op on bad input. Errors come from the
//! layers around it (storage, sync, insight, export, CLI lookups).

use thiserror::Error;

/// The main error type for envelope planner operations
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors (an operation was rejected and nothing changed)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cloud sync errors
    #[error("Sync error: {0}")]
    Sync(String),

    /// Insight generation errors
    #[error("Insight error: {0}")]
    Insight(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// The user declined a confirmation prompt
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl EnvelopeError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for months
    pub fn month_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Month",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for EnvelopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for EnvelopeError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for envelope planner operations
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
