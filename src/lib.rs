// Export modules for library usage
pub mod analyzers;
pub mod classification;
pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod driver;
pub mod errors;
pub mod io;
pub mod ir;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{FunctionId, PurityLevel};

pub use crate::analyzers::{BodyClassifier, Classification, Finding, Violation};

pub use crate::classification::{ClassificationTable, TypeCapability};

pub use crate::config::{load_config, PurityConfig};

pub use crate::diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, NullSink, Severity, StreamSink,
};

pub use crate::driver::{
    check_function, AnalysisSession, Checker, FunctionReport, FunctionState, ModuleReport,
};

pub use crate::errors::{Error, Result};

pub use crate::ir::{Expr, ExprKind, FunctionDecl, FunctionSignature, Module, SourceFile};
