//! Traversal-local state
//!
//! One accumulator lives for exactly one body walk. Support flags only ever
//! go from `true` to `false`.

use super::types::{Finding, Violation};
use crate::core::PurityLevel;

#[derive(Debug)]
pub(super) struct Accumulator {
    declared: PurityLevel,
    supports_readonly: bool,
    supports_pure: bool,
    findings: Vec<Finding>,
    visited_nodes: usize,
}

impl Accumulator {
    pub(super) fn new(declared: PurityLevel) -> Self {
        Self {
            declared,
            supports_readonly: true,
            supports_pure: true,
            findings: Vec::new(),
            visited_nodes: 0,
        }
    }

    pub(super) fn visit_node(&mut self) {
        self.visited_nodes += 1;
    }

    /// Cap the inferred level at `level`
    pub(super) fn limit_to(&mut self, level: PurityLevel) {
        if level < PurityLevel::Pure {
            self.supports_pure = false;
        }
        if level < PurityLevel::Readonly {
            self.supports_readonly = false;
        }
    }

    /// Record a construct; reported only when the declared level exceeds what
    /// the construct supports
    pub(super) fn record(&mut self, violation: Violation, offset: usize) {
        let supported = violation.supported_level();
        self.limit_to(supported);
        if self.declared > supported {
            log::trace!("Violation at offset {}: {:?}", offset, violation);
            self.findings.push(Finding { violation, offset });
        }
    }

    pub(super) fn inferred(&self) -> PurityLevel {
        PurityLevel::from_support(self.supports_readonly, self.supports_pure)
    }

    pub(super) fn finish(self) -> (PurityLevel, Vec<Finding>, usize) {
        let inferred = self.inferred();
        (inferred, self.findings, self.visited_nodes)
    }
}
