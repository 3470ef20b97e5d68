//! Source files, line tables and display locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::FunctionDecl;

/// Position of a finding, 1-indexed for click-to-navigate output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file://{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Position of one declaration in a module.
///
/// Overloads share a qualified name but never a position, so this is what
/// identifies a declaration during a run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DeclarationKey {
    /// Index into [`Module::files`]
    pub file: usize,
    /// Index into that file's [`SourceFile::functions`]
    pub index: usize,
}

impl DeclarationKey {
    pub fn new(file: usize, index: usize) -> Self {
        Self { file, index }
    }
}

impl fmt::Display for DeclarationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.file, self.index)
    }
}

/// One source file and the declarations found in it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Byte offsets at which each line starts; the first entry is always 0
    #[serde(default = "default_line_starts")]
    pub line_starts: Vec<usize>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
}

fn default_line_starts() -> Vec<usize> {
    vec![0]
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line_starts: default_line_starts(),
            functions: Vec::new(),
        }
    }

    /// Build the line table from the file's text
    pub fn with_text(mut self, text: &str) -> Self {
        self.line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        self
    }

    pub fn with_function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    /// 0-indexed `(line, column)` of a byte offset
    pub fn line_and_column(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_at) => insert_at.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        (line, offset.saturating_sub(line_start))
    }

    /// Display location of a byte offset
    pub fn location(&self, offset: usize) -> SourceLocation {
        let (line, column) = self.line_and_column(offset);
        SourceLocation {
            file: self.path.clone(),
            line: line + 1,
            column: column + 1,
        }
    }
}

/// Everything the host hands over for one compilation unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    /// Every declaration paired with the file it lives in
    pub fn functions(&self) -> impl Iterator<Item = (&SourceFile, &FunctionDecl)> {
        self.files
            .iter()
            .flat_map(|file| file.functions.iter().map(move |f| (file, f)))
    }

    /// Like [`Module::functions`], with each declaration's position
    pub fn declarations(
        &self,
    ) -> impl Iterator<Item = (DeclarationKey, &SourceFile, &FunctionDecl)> {
        self.files.iter().enumerate().flat_map(|(file_index, file)| {
            file.functions
                .iter()
                .enumerate()
                .map(move |(index, f)| (DeclarationKey::new(file_index, index), file, f))
        })
    }

    pub fn function_count(&self) -> usize {
        self.files.iter().map(|f| f.functions.len()).sum()
    }
}
