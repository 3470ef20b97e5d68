//! Function body classification
//!
//! Walks one function body against the [`ClassificationTable`] and computes
//! the strongest [`PurityLevel`] the body supports, collecting every
//! construct that falls short of the function's declared level.
//!
//! Rules, per node kind:
//!
//! - writes to a variable owned by another function cap the level at `None`;
//!   writes to the function's own locals are free
//! - reads of a reassignable variable owned by another function cap the level
//!   at `Readonly`
//! - calls are capped at the callee's declared level, except members of
//!   encapsulated-stateful types called on a receiver the function created
//!   itself (and the constructors creating such receivers), which count as
//!   pure
//! - returns, casts, blocks and declarations are transparent
//! - unrecognized node kinds cap the level at `None`
//!
//! The walk always covers the whole tree; nothing short-circuits.
//!
//! # Example
//!
//! ```
//! use puritycheck::analyzers::body_classifier::BodyClassifier;
//! use puritycheck::classification::ClassificationTable;
//! use puritycheck::core::PurityLevel;
//! use puritycheck::testkit::{const_int, function, ret};
//!
//! let table = ClassificationTable::new();
//! let answer = function("sample.answer").body(ret(const_int(42))).build();
//! let result = BodyClassifier::new(&table).classify(&answer, PurityLevel::Pure);
//! assert_eq!(result.inferred, PurityLevel::Pure);
//! assert!(result.findings.is_empty());
//! ```

mod accumulator;
mod types;

pub use types::{Classification, Finding, Violation};

use self::accumulator::Accumulator;
use crate::classification::ClassificationTable;
use crate::core::{FunctionId, PurityLevel};
use crate::ir::{Call, Expr, ExprKind, FunctionDecl, VariableRef};

/// Classifies function bodies. Holds no per-function state, so one instance
/// can classify any number of functions, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct BodyClassifier<'t> {
    table: &'t ClassificationTable,
}

impl<'t> BodyClassifier<'t> {
    pub fn new(table: &'t ClassificationTable) -> Self {
        Self { table }
    }

    /// Walk `function`'s body assuming it claims `declared`.
    ///
    /// A function without a body classifies as its declared level with no
    /// findings.
    pub fn classify(&self, function: &FunctionDecl, declared: PurityLevel) -> Classification {
        let Some(body) = function.body.as_ref() else {
            return Classification {
                declared,
                inferred: declared,
                findings: Vec::new(),
                visited_nodes: 0,
            };
        };

        let mut walk = BodyWalk {
            table: self.table,
            function: &function.id,
            acc: Accumulator::new(declared),
        };
        walk.visit(body);

        let (inferred, findings, visited_nodes) = walk.acc.finish();
        log::debug!(
            "Classified {} ({} nodes): declared {}, inferred {}, {} findings",
            function.id,
            visited_nodes,
            declared,
            inferred,
            findings.len()
        );

        Classification {
            declared,
            inferred,
            findings,
            visited_nodes,
        }
    }

    /// Level a call may assume about its callee, taking the receiver into
    /// account
    pub fn effective_callee_level(&self, call: &Call, caller: &FunctionId) -> PurityLevel {
        let declared = self.table.declared_level(&call.callee);
        if declared == PurityLevel::Pure {
            return PurityLevel::Pure;
        }
        if self.table.creates_encapsulated_instance(&call.callee) {
            return PurityLevel::Pure;
        }
        if self.table.is_encapsulated_stateful(&call.callee)
            && receiver_is_local(call.receiver.as_deref(), caller)
        {
            return PurityLevel::Pure;
        }
        declared
    }
}

/// Receiver is a plain read of a variable the caller declared in its own body;
/// parameters and captured variables do not qualify
fn receiver_is_local(receiver: Option<&Expr>, caller: &FunctionId) -> bool {
    matches!(
        receiver,
        Some(Expr {
            kind: ExprKind::GetValue { variable },
            ..
        }) if variable.is_created_in(caller)
    )
}

struct BodyWalk<'a> {
    table: &'a ClassificationTable,
    function: &'a FunctionId,
    acc: Accumulator,
}

impl BodyWalk<'_> {
    fn visit(&mut self, expr: &Expr) {
        self.acc.visit_node();

        match &expr.kind {
            ExprKind::Const { .. } => {}
            ExprKind::GetValue { variable } => self.visit_get_value(variable, expr.offset),
            ExprKind::SetValue { variable, value } => {
                self.visit_set_value(variable, expr.offset);
                self.visit(value);
            }
            ExprKind::Call(call) => {
                self.visit_call(call, expr.offset);
                if let Some(receiver) = &call.receiver {
                    self.visit(receiver);
                }
                for argument in &call.arguments {
                    self.visit(argument);
                }
            }
            ExprKind::Return { value } => self.visit(value),
            ExprKind::TypeOperator { operand, .. } => self.visit(operand),
            ExprKind::Block { statements } => {
                for statement in statements {
                    self.visit(statement);
                }
            }
            ExprKind::Declare { initializer, .. } => {
                if let Some(initializer) = initializer {
                    self.visit(initializer);
                }
            }
            ExprKind::Unhandled { node, children } => {
                self.acc.record(
                    Violation::UnrecognizedConstruct { node: node.clone() },
                    expr.offset,
                );
                for child in children {
                    self.visit(child);
                }
            }
        }
    }

    fn visit_set_value(&mut self, variable: &VariableRef, offset: usize) {
        if variable.is_owned_by(self.function) {
            return;
        }
        self.acc.record(
            Violation::SetsVariable {
                variable: variable.name.clone(),
            },
            offset,
        );
    }

    fn visit_get_value(&mut self, variable: &VariableRef, offset: usize) {
        if !variable.reassignable || variable.is_owned_by(self.function) {
            return;
        }
        self.acc.record(
            Violation::ReadsVariable {
                variable: variable.name.clone(),
            },
            offset,
        );
    }

    fn visit_call(&mut self, call: &Call, offset: usize) {
        let callee_level =
            BodyClassifier::new(self.table).effective_callee_level(call, self.function);
        if callee_level == PurityLevel::Pure {
            return;
        }
        self.acc.record(
            Violation::CallsWeaker {
                callee: call.callee.name.clone(),
                callee_level,
            },
            offset,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{
        block, call, call_of, cast, const_int, declare, function, get, local_var, member_fn,
        pure_fn, readonly_fn, ret, set, top_level_fn, unhandled,
    };
    use pretty_assertions::assert_eq;

    fn classify(decl: &FunctionDecl, declared: PurityLevel) -> Classification {
        let table = ClassificationTable::new();
        BodyClassifier::new(&table).classify(decl, declared)
    }

    #[test]
    fn test_literal_body_is_pure() {
        let decl = function("s.f").body(ret(const_int(1))).build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::Pure);
        assert!(result.findings.is_empty());
        assert_eq!(result.visited_nodes, 2);
    }

    #[test]
    fn test_local_mutation_is_exempt() {
        let counter = local_var("counter", "s.f", true);
        let decl = function("s.f")
            .body(block(vec![
                declare(&counter, Some(const_int(0))),
                set(&counter, const_int(5)),
                ret(get(&counter)),
            ]))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::Pure);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_captured_read_caps_at_readonly() {
        let external = local_var("external", "s.main", true);
        let decl = function("s.main.returnExternal")
            .body(ret(get(&external)))
            .build();

        let pure = classify(&decl, PurityLevel::Pure);
        assert_eq!(pure.inferred, PurityLevel::Readonly);
        assert_eq!(
            pure.findings[0].violation,
            Violation::ReadsVariable {
                variable: "external".into()
            }
        );

        let readonly = classify(&decl, PurityLevel::Readonly);
        assert_eq!(readonly.inferred, PurityLevel::Readonly);
        assert!(readonly.findings.is_empty());
    }

    #[test]
    fn test_captured_immutable_read_is_pure() {
        let limit = local_var("limit", "s.main", false);
        let decl = function("s.main.inner").body(ret(get(&limit))).build();
        assert_eq!(classify(&decl, PurityLevel::Pure).inferred, PurityLevel::Pure);
    }

    #[test]
    fn test_captured_write_caps_at_none() {
        let external = local_var("external", "s.main", true);
        let decl = function("s.main.justSideEffect")
            .body(set(&external, const_int(4)))
            .build();
        let result = classify(&decl, PurityLevel::Readonly);
        assert_eq!(result.inferred, PurityLevel::None);
        assert_eq!(result.findings.len(), 1);

        let silent = classify(&decl, PurityLevel::None);
        assert_eq!(silent.inferred, PurityLevel::None);
        assert!(silent.findings.is_empty());
    }

    #[test]
    fn test_call_levels() {
        let decl = function("s.f")
            .body(block(vec![
                call(readonly_fn("peek"), None, vec![]),
                call(pure_fn("give"), None, vec![const_int(1)]),
            ]))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::Readonly);
        assert_eq!(
            result.findings,
            vec![Finding {
                violation: Violation::CallsWeaker {
                    callee: "peek".into(),
                    callee_level: PurityLevel::Readonly,
                },
                offset: 0,
            }]
        );
    }

    #[test]
    fn test_unknown_callee_is_impure() {
        let decl = function("s.f")
            .body(call(top_level_fn("untrustable"), None, vec![]))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::None);
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn test_arguments_are_traversed() {
        let external = local_var("external", "s.main", true);
        let decl = function("s.main.f")
            .body(call(pure_fn("give"), None, vec![get(&external)]))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::Readonly);
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn test_local_builder_is_pure() {
        let builder = local_var("sb", "s.f", false);
        let decl = function("s.f")
            .body(block(vec![
                declare(
                    &builder,
                    Some(call(member_fn("<init>", "java.lang.StringBuilder"), None, vec![])),
                ),
                call(
                    member_fn("append", "java.lang.StringBuilder"),
                    Some(get(&builder)),
                    vec![const_int(1)],
                ),
                ret(call(
                    member_fn("toString", "java.lang.StringBuilder"),
                    Some(get(&builder)),
                    vec![],
                )),
            ]))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::Pure);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_received_builder_is_not_exempt() {
        let decl = function("s.f").param("sb").build();
        let table = ClassificationTable::new();
        let classifier = BodyClassifier::new(&table);
        let append = member_fn("append", "java.lang.StringBuilder");

        let parameter = decl.parameter_ref("sb").unwrap();
        let captured = local_var("sb", "s.other", false);
        let local = local_var("sb", "s.f", false);

        let on = |receiver: &VariableRef| call_of(append.clone(), Some(get(receiver)), vec![]);
        assert_eq!(
            classifier.effective_callee_level(&on(&parameter), &decl.id),
            PurityLevel::None
        );
        assert_eq!(
            classifier.effective_callee_level(&on(&captured), &decl.id),
            PurityLevel::None
        );
        assert_eq!(
            classifier.effective_callee_level(&on(&local), &decl.id),
            PurityLevel::Pure
        );
        // A receiver that is not a plain variable read never qualifies
        let nested = call_of(
            append.clone(),
            Some(call(append.clone(), Some(get(&local)), vec![])),
            vec![],
        );
        assert_eq!(
            classifier.effective_callee_level(&nested, &decl.id),
            PurityLevel::None
        );
    }

    #[test]
    fn test_transparent_wrappers() {
        let external = local_var("external", "s.main", true);
        let decl = function("s.main.f")
            .body(ret(cast(set(&external, const_int(1)))))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::None);
        assert_eq!(result.findings.len(), 1);
    }

    #[test]
    fn test_unhandled_node_is_conservative_and_still_walked() {
        let external = local_var("external", "s.main", true);
        let decl = function("s.main.f")
            .body(unhandled("IrTry", vec![set(&external, const_int(1))]))
            .build();
        let result = classify(&decl, PurityLevel::Pure);
        assert_eq!(result.inferred, PurityLevel::None);
        assert_eq!(
            result
                .findings
                .iter()
                .map(|f| f.violation.clone())
                .collect::<Vec<_>>(),
            vec![
                Violation::UnrecognizedConstruct {
                    node: "IrTry".into()
                },
                Violation::SetsVariable {
                    variable: "external".into()
                },
            ]
        );
    }

    #[test]
    fn test_abstract_function_keeps_declared_level() {
        let decl = function("s.Shape.area").build();
        let result = classify(&decl, PurityLevel::Readonly);
        assert_eq!(result.inferred, PurityLevel::Readonly);
        assert_eq!(result.visited_nodes, 0);
    }
}
