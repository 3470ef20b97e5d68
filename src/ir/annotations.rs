//! Annotation metadata attached to declarations and the narrow lookup seam
//! the classification table reads it through.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a single annotation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    String(String),
}

/// An annotation application, e.g. `@Contract(pure = true)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Fully qualified annotation class name
    pub name: String,
    #[serde(default)]
    pub arguments: BTreeMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_bool(mut self, argument: impl Into<String>, value: bool) -> Self {
        self.arguments
            .insert(argument.into(), AnnotationValue::Bool(value));
        self
    }

    pub fn with_string(mut self, argument: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments
            .insert(argument.into(), AnnotationValue::String(value.into()));
        self
    }
}

/// Read access to the annotations of one declaration.
///
/// Hosts implement this over whatever reflection API their compiler offers;
/// the checker only ever asks these three questions.
pub trait AnnotationLookup {
    /// All annotations on the declaration
    fn annotations(&self) -> &[Annotation];

    fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations().iter().any(|a| a.name == annotation)
    }

    fn bool_argument(&self, annotation: &str, argument: &str) -> Option<bool> {
        self.annotations()
            .iter()
            .filter(|a| a.name == annotation)
            .find_map(|a| match a.arguments.get(argument) {
                Some(AnnotationValue::Bool(value)) => Some(*value),
                _ => None,
            })
    }

    fn string_argument(&self, annotation: &str, argument: &str) -> Option<&str> {
        self.annotations()
            .iter()
            .filter(|a| a.name == annotation)
            .find_map(|a| match a.arguments.get(argument) {
                Some(AnnotationValue::String(value)) => Some(value.as_str()),
                _ => None,
            })
    }
}

impl AnnotationLookup for [Annotation] {
    fn annotations(&self) -> &[Annotation] {
        self
    }
}

impl AnnotationLookup for Vec<Annotation> {
    fn annotations(&self) -> &[Annotation] {
        self
    }
}
