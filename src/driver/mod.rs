//! Analysis driver
//!
//! For every declaration with a body: compute the declared level, classify
//! the body, and turn the comparison into diagnostics.
//!
//! - per-construct warnings come from the classifier and are emitted only
//!   where the declared level exceeds what the construct supports, so a
//!   function without a claim never gets a warning
//! - a function that qualifies for more than it claims, and that the user
//!   actually wrote, gets one info suggestion naming the stronger level
//! - declarations without a body are skipped silently
//!
//! All diagnostics of one function are built before any is reported, so an
//! internal consistency failure aborts that function without partial output.

mod session;

pub use session::{AnalysisSession, FunctionState};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analyzers::body_classifier::BodyClassifier;
use crate::classification::ClassificationTable;
use crate::config::PurityConfig;
use crate::core::{FunctionId, PurityLevel};
use crate::diagnostics::messages::{suggestion_message, violation_message};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::Result;
use crate::ir::{DeclarationKey, FunctionDecl, Module, SourceFile};

/// Outcome for one classified function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub id: FunctionId,
    pub declared: PurityLevel,
    pub inferred: PurityLevel,
    pub synthesized: bool,
    pub warnings: usize,
    pub suggested: bool,
}

/// A function whose analysis was aborted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFailure {
    pub id: FunctionId,
    pub reason: String,
}

/// Outcome for a whole module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub functions: Vec<FunctionReport>,
    pub skipped: usize,
    pub failures: Vec<FunctionFailure>,
}

impl ModuleReport {
    pub fn warning_count(&self) -> usize {
        self.functions.iter().map(|f| f.warnings).sum()
    }

    pub fn suggestion_count(&self) -> usize {
        self.functions.iter().filter(|f| f.suggested).count()
    }

    pub fn get(&self, id: &str) -> Option<&FunctionReport> {
        self.functions.iter().find(|f| f.id.as_str() == id)
    }
}

/// Check one declaration and report its diagnostics to `sink`.
///
/// Returns `Ok(None)` for declarations without a body.
pub fn check_function(
    table: &ClassificationTable,
    file: &SourceFile,
    decl: &FunctionDecl,
    sink: &dyn DiagnosticSink,
) -> Result<Option<FunctionReport>> {
    if !decl.has_body() {
        log::trace!("Skipping {}: no body", decl.id);
        return Ok(None);
    }

    let declared = table.declared_level(&decl.signature);
    let synthesized = table.is_synthesized(&decl.signature);
    let classification = BodyClassifier::new(table).classify(decl, declared);

    let mut diagnostics: Vec<Diagnostic> = classification
        .findings
        .iter()
        .map(|finding| {
            Diagnostic::warning(
                decl.id.clone(),
                file.location(finding.offset),
                violation_message(decl.name(), declared, &finding.violation),
            )
        })
        .collect();
    let warnings = diagnostics.len();

    let suggested = classification.is_under_claimed() && !synthesized;
    if suggested {
        let message = suggestion_message(&decl.id, decl.name(), classification.inferred)?;
        diagnostics.push(Diagnostic::info(
            decl.id.clone(),
            file.location(decl.offset),
            message,
        ));
    }

    for diagnostic in diagnostics {
        sink.report(diagnostic);
    }

    Ok(Some(FunctionReport {
        id: decl.id.clone(),
        declared,
        inferred: classification.inferred,
        synthesized,
        warnings,
        suggested,
    }))
}

/// Configured entry point: owns the classification table built from
/// configuration and runs whole modules.
#[derive(Debug, Clone)]
pub struct Checker {
    table: ClassificationTable,
    enabled: bool,
    parallel: bool,
}

impl Checker {
    pub fn new(config: &PurityConfig) -> Self {
        Self {
            table: config.classification_table(),
            enabled: config.enabled,
            parallel: config.parallel,
        }
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check every function of `module`, reporting diagnostics to `sink`
    pub fn check_module(&self, module: &Module, sink: &dyn DiagnosticSink) -> ModuleReport {
        if !self.enabled {
            log::info!("Purity checking disabled; skipping module {}", module.name);
            return ModuleReport::default();
        }

        let session = AnalysisSession::new(&self.table);
        let declarations: Vec<(DeclarationKey, &SourceFile, &FunctionDecl)> =
            module.declarations().collect();
        log::debug!(
            "Checking {} functions in module {} ({})",
            declarations.len(),
            module.name,
            if self.parallel { "parallel" } else { "sequential" }
        );

        let visit = |(key, file, decl): &(DeclarationKey, &SourceFile, &FunctionDecl)| {
            (*key, decl.id.clone(), session.visit(*key, file, decl, sink))
        };
        let outcomes: Vec<_> = if self.parallel {
            declarations.par_iter().map(visit).collect()
        } else {
            declarations.iter().map(visit).collect()
        };

        let mut report = ModuleReport::default();
        for (key, id, outcome) in outcomes {
            match outcome {
                Ok(Some(function)) => report.functions.push(function),
                Ok(None) => {
                    if session.state(key) == FunctionState::Skipped {
                        report.skipped += 1;
                    }
                }
                Err(e) => {
                    log::error!("Aborted analysis of {} ({}): {}", id, key, e);
                    report.failures.push(FunctionFailure {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        report
    }
}
