//! Proptest strategies for function bodies with a known expected level.

use proptest::prelude::*;

use super::helpers::{
    block, call, const_int, function, get, local_var, pure_fn, readonly_fn, ret, set,
    top_level_fn, unhandled,
};
use crate::core::PurityLevel;
use crate::ir::{Expr, FunctionDecl};

const OWNER: &str = "gen.main";
const FUNCTION: &str = "gen.main.subject";

/// A single construct and the strongest level a body containing it allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Literal,
    ReadImmutableCapture,
    ReadMutableCapture,
    WriteCapture,
    WriteLocal,
    CallPure,
    CallReadonly,
    CallUnknown,
    Unrecognized,
}

impl Construct {
    pub fn supported_level(self) -> PurityLevel {
        match self {
            Construct::Literal
            | Construct::ReadImmutableCapture
            | Construct::WriteLocal
            | Construct::CallPure => PurityLevel::Pure,
            Construct::ReadMutableCapture | Construct::CallReadonly => PurityLevel::Readonly,
            Construct::WriteCapture | Construct::CallUnknown | Construct::Unrecognized => {
                PurityLevel::None
            }
        }
    }

    pub fn to_expr(self) -> Expr {
        match self {
            Construct::Literal => const_int(1),
            Construct::ReadImmutableCapture => get(&local_var("fixed", OWNER, false)),
            Construct::ReadMutableCapture => get(&local_var("counter", OWNER, true)),
            Construct::WriteCapture => set(&local_var("counter", OWNER, true), const_int(2)),
            Construct::WriteLocal => set(&local_var("scratch", FUNCTION, true), const_int(3)),
            Construct::CallPure => call(pure_fn("square"), None, vec![const_int(4)]),
            Construct::CallReadonly => call(readonly_fn("peek"), None, vec![]),
            Construct::CallUnknown => call(top_level_fn("launch"), None, vec![]),
            Construct::Unrecognized => unhandled("try", vec![]),
        }
    }
}

pub fn construct_strategy() -> impl Strategy<Value = Construct> {
    prop_oneof![
        Just(Construct::Literal),
        Just(Construct::ReadImmutableCapture),
        Just(Construct::ReadMutableCapture),
        Just(Construct::WriteCapture),
        Just(Construct::WriteLocal),
        Just(Construct::CallPure),
        Just(Construct::CallReadonly),
        Just(Construct::CallUnknown),
        Just(Construct::Unrecognized),
    ]
}

pub fn declared_strategy() -> impl Strategy<Value = PurityLevel> {
    proptest::sample::select(PurityLevel::ALL.to_vec())
}

/// Unannotated function whose body is a block of `constructs` ending in a
/// return
pub fn body_of(constructs: &[Construct]) -> FunctionDecl {
    let mut statements: Vec<Expr> = constructs.iter().map(|c| c.to_expr()).collect();
    statements.push(ret(const_int(0)));
    function(FUNCTION).body(block(statements)).build()
}

pub fn expected_level(constructs: &[Construct]) -> PurityLevel {
    constructs
        .iter()
        .map(|c| c.supported_level())
        .fold(PurityLevel::Pure, PurityLevel::meet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::body_classifier::BodyClassifier;
    use crate::classification::ClassificationTable;

    proptest! {
        /// Property: the inferred level is the weakest level any single
        /// construct supports, whatever the declared level.
        #[test]
        fn inferred_level_is_weakest_construct(
            constructs in prop::collection::vec(construct_strategy(), 0..12),
            declared in declared_strategy(),
        ) {
            let table = ClassificationTable::new();
            let decl = body_of(&constructs);
            let result = BodyClassifier::new(&table).classify(&decl, declared);
            prop_assert_eq!(result.inferred, expected_level(&constructs));
        }

        /// Property: findings appear only for constructs weaker than the
        /// declared level, and never when nothing is declared.
        #[test]
        fn findings_only_below_declared(
            constructs in prop::collection::vec(construct_strategy(), 0..12),
            declared in declared_strategy(),
        ) {
            let table = ClassificationTable::new();
            let decl = body_of(&constructs);
            let result = BodyClassifier::new(&table).classify(&decl, declared);
            let expected = constructs
                .iter()
                .filter(|c| c.supported_level() < declared)
                .count();
            prop_assert_eq!(result.findings.len(), expected);
        }

        /// Property: classifying twice gives the same answer.
        #[test]
        fn classification_is_idempotent(
            constructs in prop::collection::vec(construct_strategy(), 0..12),
            declared in declared_strategy(),
        ) {
            let table = ClassificationTable::new();
            let classifier = BodyClassifier::new(&table);
            let decl = body_of(&constructs);
            prop_assert_eq!(
                classifier.classify(&decl, declared),
                classifier.classify(&decl, declared)
            );
        }
    }
}
