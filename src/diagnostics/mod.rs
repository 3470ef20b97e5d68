//! Diagnostics produced by the checker and the sinks that receive them.
//!
//! The checker never fails a build: every outcome is a [`Severity::Warning`]
//! or an advisory [`Severity::Info`].

pub mod messages;
mod sink;

pub use sink::{CollectingSink, DiagnosticSink, NullSink, StreamSink};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::FunctionId;
use crate::ir::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
    /// Function whose analysis produced the message
    pub function: FunctionId,
}

impl Diagnostic {
    pub fn warning(function: FunctionId, location: SourceLocation, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
            function,
        }
    }

    pub fn info(function: FunctionId, location: SourceLocation, message: String) -> Self {
        Self {
            severity: Severity::Info,
            message,
            location,
            function,
        }
    }

    /// `file://path:line:column message`, the single-line rendering used by
    /// stream sinks
    pub fn render(&self) -> String {
        format!("{} {}", self.location, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.render())
    }
}
