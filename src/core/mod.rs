//! Core value types shared by every stage of the checker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How side-effect free a function is.
///
/// The variants are declared weakest first so that the derived `Ord` gives the
/// lattice order `None < Readonly < Pure`. The meet of two levels is `min`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PurityLevel {
    /// No guarantee; may read and write external state
    #[default]
    None,
    /// May read external mutable state but never writes it
    Readonly,
    /// Result depends only on the arguments and locally created state
    Pure,
}

impl PurityLevel {
    /// All levels, weakest first
    pub const ALL: [PurityLevel; 3] = [PurityLevel::None, PurityLevel::Readonly, PurityLevel::Pure];

    /// Lattice meet: the weaker of the two levels
    pub fn meet(self, other: PurityLevel) -> PurityLevel {
        self.min(other)
    }

    /// Level implied by the two traversal flags
    pub fn from_support(supports_readonly: bool, supports_pure: bool) -> PurityLevel {
        if supports_pure {
            PurityLevel::Pure
        } else if supports_readonly {
            PurityLevel::Readonly
        } else {
            PurityLevel::None
        }
    }
}

impl fmt::Display for PurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurityLevel::None => "None",
            PurityLevel::Readonly => "Readonly",
            PurityLevel::Pure => "Pure",
        };
        f.write_str(name)
    }
}

/// Fully qualified function name, e.g. `sample.main.returnExternal`.
///
/// Ownership of local variables is expressed through this id: a variable read
/// or written from a function whose id differs from the variable's owner is a
/// captured binding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionId(pub String);

impl FunctionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FunctionId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for FunctionId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        assert!(PurityLevel::None < PurityLevel::Readonly);
        assert!(PurityLevel::Readonly < PurityLevel::Pure);
        assert_eq!(PurityLevel::Pure.meet(PurityLevel::Readonly), PurityLevel::Readonly);
        assert_eq!(PurityLevel::None.meet(PurityLevel::Pure), PurityLevel::None);
    }

    #[test]
    fn test_from_support() {
        assert_eq!(PurityLevel::from_support(true, true), PurityLevel::Pure);
        assert_eq!(PurityLevel::from_support(true, false), PurityLevel::Readonly);
        assert_eq!(PurityLevel::from_support(false, false), PurityLevel::None);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&PurityLevel::Readonly).unwrap();
        assert_eq!(json, "\"readonly\"");
        let level: PurityLevel = serde_json::from_str("\"pure\"").unwrap();
        assert_eq!(level, PurityLevel::Pure);
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(FunctionId::from("sample.main.add").simple_name(), "add");
        assert_eq!(FunctionId::from("add").simple_name(), "add");
    }
}
