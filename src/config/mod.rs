//! Checker configuration.
//!
//! Settings live under a `[purity]` table in `.puritycheck.toml`:
//!
//! ```toml
//! [purity]
//! enabled = true
//! pure_function_names = ["kotlin.math.MathKt.max", "Point.norm"]
//! parallel = true
//! ```

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

use serde::{Deserialize, Serialize};

use crate::classification::ClassificationTable;

fn default_enabled() -> bool {
    true
}

fn default_parallel() -> bool {
    true
}

/// Settings consumed by the checker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurityConfig {
    /// Run the checker at all (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Extra functions trusted as pure, by qualified name
    #[serde(default)]
    pub pure_function_names: Vec<String>,

    /// Classify functions on the rayon pool (default: true)
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PurityConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            pure_function_names: Vec::new(),
            parallel: default_parallel(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub disable: bool,
    pub pure_function_names: Option<String>,
    pub no_parallel: bool,
}

impl PurityConfig {
    /// Drop blank names and surrounding whitespace
    pub fn normalize(&mut self) {
        self.pure_function_names = self
            .pure_function_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }

    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.disable {
            self.enabled = false;
        }
        if overrides.no_parallel {
            self.parallel = false;
        }
        if let Some(list) = &overrides.pure_function_names {
            self.pure_function_names = parse_pure_function_names(list);
        }
        self
    }

    pub fn classification_table(&self) -> ClassificationTable {
        ClassificationTable::with_trusted_functions(self.pure_function_names.iter().cloned())
    }
}

/// Split a comma-separated list of function names
pub fn parse_pure_function_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// On-disk layout of `.puritycheck.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub purity: PurityConfig,
}
