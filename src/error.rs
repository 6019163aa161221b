//! Error handling for PGA lookup operations.
//!
//! Provides error types with context for reference data loading,
//! table joins and configuration failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Reference data unavailable: {name} - {reason}")]
    DataUnavailable { name: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Lookup interrupted: {reason}")]
    Interrupted { reason: String },

    #[error("Background task failed: {reason}")]
    TaskFailed { reason: String },
}

impl LookupError {
    pub fn data_unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    pub fn task_failed(reason: impl Into<String>) -> Self {
        Self::TaskFailed {
            reason: reason.into(),
        }
    }

    /// True when the failure means reference data (or the requested key) could not be used
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
