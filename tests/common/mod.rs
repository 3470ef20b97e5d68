// Test utility module for puritycheck integration tests
#![allow(dead_code)]

use puritycheck::diagnostics::{CollectingSink, Diagnostic, Severity};
use puritycheck::driver::{Checker, ModuleReport};
use puritycheck::ir::{FunctionDecl, Module};
use puritycheck::testkit::module_of;
use puritycheck::PurityConfig;

/// Source text the sample declarations point into
pub const SAMPLE_SOURCE: &str = "\
fun main() {
    var externalVar = 3
    fun returnExternal(): Int = externalVar
    fun square(a: Int) = a * a
}
";

pub const SAMPLE_PATH: &str = "src/Sample.kt";

/// Diagnostics and report of one module run
#[derive(Debug)]
pub struct RunResult {
    pub report: ModuleReport,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunResult {
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn infos(&self) -> Vec<&Diagnostic> {
        self.with_severity(Severity::Info)
    }

    fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }
}

pub fn sample_module(functions: Vec<FunctionDecl>) -> Module {
    module_of(SAMPLE_PATH, SAMPLE_SOURCE, functions)
}

pub fn run_module(module: &Module, config: &PurityConfig) -> RunResult {
    let sink = CollectingSink::new();
    let mut report = Checker::new(config).check_module(module, &sink);
    report.functions.sort_by(|a, b| a.id.cmp(&b.id));
    RunResult {
        report,
        diagnostics: sink.into_sorted(),
    }
}

/// Run with default configuration on the sample source
pub fn run_functions(functions: Vec<FunctionDecl>) -> RunResult {
    run_module(&sample_module(functions), &PurityConfig::default())
}
