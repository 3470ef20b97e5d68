use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::diagnostics::{Diagnostic, Severity};
use crate::driver::ModuleReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Terminal,
}

/// Everything a run produces for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutput {
    pub module: String,
    pub diagnostics: Vec<Diagnostic>,
    pub report: ModuleReport,
}

impl CheckOutput {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

pub trait OutputWriter {
    fn write_output(&mut self, output: &CheckOutput) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_output(&mut self, output: &CheckOutput) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(output)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// One line per diagnostic followed by a summary.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> anyhow::Result<()> {
        let severity = match diagnostic.severity {
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".cyan(),
        };
        writeln!(self.writer, "{}: {}", severity, diagnostic.render())?;
        Ok(())
    }

    fn write_summary(&mut self, output: &CheckOutput) -> anyhow::Result<()> {
        let report = &output.report;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {}: {} functions checked, {} skipped, {} warnings, {} suggestions",
            "Purity".bold(),
            output.module,
            report.functions.len(),
            report.skipped,
            output.count(Severity::Warning),
            output.count(Severity::Info),
        )?;
        if !report.failures.is_empty() {
            writeln!(
                self.writer,
                "{} {} functions could not be analyzed",
                "error:".red().bold(),
                report.failures.len()
            )?;
            for failure in &report.failures {
                writeln!(self.writer, "  {}: {}", failure.id, failure.reason)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_output(&mut self, output: &CheckOutput) -> anyhow::Result<()> {
        for diagnostic in &output.diagnostics {
            self.write_diagnostic(diagnostic)?;
        }
        self.write_summary(output)
    }
}
