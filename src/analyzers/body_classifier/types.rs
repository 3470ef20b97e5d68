//! Core types for body classification

use serde::{Deserialize, Serialize};

use crate::core::PurityLevel;

/// A construct that prevents the body from reaching some purity level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    /// Write to a variable declared by another function
    SetsVariable { variable: String },
    /// Read of a reassignable variable declared by another function
    ReadsVariable { variable: String },
    /// Call to something weaker than the caller's declared level
    CallsWeaker {
        callee: String,
        callee_level: PurityLevel,
    },
    /// Node kind the classifier has no rule for
    UnrecognizedConstruct { node: String },
}

impl Violation {
    /// Strongest level a function containing this construct can still have
    pub fn supported_level(&self) -> PurityLevel {
        match self {
            Violation::SetsVariable { .. } => PurityLevel::None,
            Violation::ReadsVariable { .. } => PurityLevel::Readonly,
            Violation::CallsWeaker { callee_level, .. } => *callee_level,
            Violation::UnrecognizedConstruct { .. } => PurityLevel::None,
        }
    }
}

/// A violation together with where it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub violation: Violation,
    /// Byte offset of the offending node
    pub offset: usize,
}

/// Result of walking one function body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub declared: PurityLevel,
    pub inferred: PurityLevel,
    /// Findings that violate the declared level, in traversal order
    pub findings: Vec<Finding>,
    /// Nodes visited, including the root
    pub visited_nodes: usize,
}

impl Classification {
    pub fn meets_declared(&self) -> bool {
        self.inferred >= self.declared
    }

    /// The function qualifies for more than it claims
    pub fn is_under_claimed(&self) -> bool {
        self.inferred > self.declared
    }
}
