//! Shared error types for the checker

use std::path::PathBuf;
use thiserror::Error;

use crate::core::{FunctionId, PurityLevel};

/// Main error type for puritycheck operations.
///
/// Findings about analyzed code are never errors; they are diagnostics. An
/// `Error` means the checker itself could not do its job.
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Module file could not be decoded
    #[error("Invalid module {path}: {source}")]
    Module {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The classifier reached a state it has no rule for; this is a bug in
    /// the checker, not in the analyzed code
    #[error("Internal consistency failure in {function}: {detail}")]
    InternalConsistency { function: FunctionId, detail: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// No message template exists for suggesting `level`
    pub fn no_suggestion_for(function: &FunctionId, level: PurityLevel) -> Self {
        Self::InternalConsistency {
            function: function.clone(),
            detail: format!("unexpected inferred level {} for a suggestion", level),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InternalConsistency { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
