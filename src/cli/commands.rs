//! Subcommand handlers.

use anyhow::{Context, Result};
use colored::*;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::args::Commands;
use super::setup::{configure_thread_pool, init_logging};
use crate::classification::{ClassificationTable, TypeCapability};
use crate::config::{load_config, load_config_from_path, ConfigOverrides, PurityConfig};
use crate::diagnostics::CollectingSink;
use crate::driver::Checker;
use crate::io::{self, CheckOutput, JsonWriter, OutputFormat, OutputWriter, TerminalWriter};

/// Explicit path if given, otherwise discovery from the working directory
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PurityConfig> {
    let config = match path {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };
    Ok(config.apply_overrides(overrides))
}

pub fn run(command: Commands) -> Result<()> {
    let overrides = command.overrides();
    match command {
        Commands::Check {
            module,
            config,
            format,
            output,
            jobs,
            verbosity,
            ..
        } => {
            init_logging(verbosity);
            configure_thread_pool(jobs);
            let config = resolve_config(config.as_deref(), &overrides)?;
            handle_check(&module, &config, format.into(), output)
        }
        Commands::Explain { config } => {
            init_logging(0);
            let config = resolve_config(config.as_deref(), &overrides)?;
            let mut stdout = std::io::stdout().lock();
            write_explanation(&mut stdout, &config.classification_table())
        }
    }
}

/// Analyze one module file and write the diagnostics
pub fn handle_check(
    module_path: &Path,
    config: &PurityConfig,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let module = io::load_module(module_path)?;
    let checker = Checker::new(config);
    let sink = CollectingSink::new();
    let report = checker.check_module(&module, &sink);

    let result = CheckOutput {
        module: module.name.clone(),
        diagnostics: sink.into_sorted(),
        report,
    };
    log::info!(
        "{} functions checked in {}",
        result.report.functions.len(),
        module_path.display()
    );

    match output {
        Some(path) => {
            let mut buffer = Vec::new();
            write_with(&mut buffer, format, &result)?;
            let text = String::from_utf8(buffer).context("Output is not valid UTF-8")?;
            io::write_file(&path, &text)?;
        }
        None => {
            let stdout = std::io::stdout();
            write_with(stdout.lock(), format, &result)?;
        }
    }
    Ok(())
}

fn write_with<W: Write>(writer: W, format: OutputFormat, output: &CheckOutput) -> Result<()> {
    match format {
        OutputFormat::Json => JsonWriter::new(writer).write_output(output),
        OutputFormat::Terminal => TerminalWriter::new(writer).write_output(output),
    }
}

/// Print the rule tables the checker consults
pub fn write_explanation<W: Write>(writer: &mut W, table: &ClassificationTable) -> Result<()> {
    writeln!(writer, "{}", "Declared purity".bold())?;
    writeln!(writer, "  @Contract(pure = true)   -> Pure")?;
    writeln!(writer, "  @Contract(\"readonly\")    -> Readonly")?;
    writeln!(writer, "  member of a pure type    -> Pure")?;
    writeln!(writer, "  member of a readonly type -> Readonly")?;
    writeln!(writer, "  trusted function name    -> Pure")?;
    writeln!(writer, "  compile-time evaluable   -> Pure")?;
    writeln!(writer, "  anything else            -> None")?;

    for (title, capability) in [
        ("Pure types", TypeCapability::Pure),
        ("Readonly types", TypeCapability::Readonly),
        ("Encapsulated stateful types", TypeCapability::EncapsulatedStateful),
    ] {
        writeln!(writer)?;
        writeln!(writer, "{}", title.bold())?;
        for type_name in table.types_with(capability) {
            writeln!(writer, "  {}", type_name)?;
        }
    }

    let mut trusted: Vec<&str> = table.trusted_pure_functions().collect();
    if !trusted.is_empty() {
        trusted.sort_unstable();
        writeln!(writer)?;
        writeln!(writer, "{}", "Trusted pure functions".bold())?;
        for name in trusted {
            writeln!(writer, "  {}", name)?;
        }
    }
    Ok(())
}
