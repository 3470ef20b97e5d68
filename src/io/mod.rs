pub mod output;

pub use output::{CheckOutput, JsonWriter, OutputFormat, OutputWriter, TerminalWriter};

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::ir::Module;

/// Read a module description produced by the front end
pub fn load_module(path: &Path) -> Result<Module> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read module", path, e))?;
    parse_module(&contents, path)
}

/// Parse a module description.
///
/// Bodies nest without limit, so the JSON recursion limit is lifted and the
/// stack grows on demand while deserializing.
pub fn parse_module(contents: &str, path: &Path) -> Result<Module> {
    let invalid = |source| Error::Module {
        path: path.to_path_buf(),
        source,
    };
    let mut json = serde_json::Deserializer::from_str(contents);
    json.disable_recursion_limit();
    let module = Module::deserialize(serde_stacker::Deserializer::new(&mut json))
        .map_err(invalid)?;
    json.end().map_err(invalid)?;
    log::debug!(
        "Loaded module {} with {} functions from {}",
        module.name,
        module.function_count(),
        path.display()
    );
    Ok(module)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system("Failed to write output", path, e))
}
