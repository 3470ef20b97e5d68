//! Detection of compiler-synthesized declarations
//!
//! Synthesized members are not under the user's control, so the checker never
//! suggests annotating them. Violations inside them are still reported.

use super::constants::{
    DATA_COMPONENT_PREFIX, DATA_COPY_MEMBER, SYNTHESIZED_ENUM_MEMBERS, SYNTHESIZED_MEMBERS,
    SYNTHESIZED_NAME_PREFIX,
};
use crate::ir::{FunctionSignature, TypeKind};

/// Check if a declaration was generated by the compiler rather than written
pub fn is_synthesized(signature: &FunctionSignature) -> bool {
    let name = signature.name.as_str();

    SYNTHESIZED_MEMBERS.contains(&name)
        || name.starts_with(SYNTHESIZED_NAME_PREFIX)
        || match signature.owner_kind() {
            Some(TypeKind::Enum) => SYNTHESIZED_ENUM_MEMBERS.contains(&name),
            Some(TypeKind::Data) => name == DATA_COPY_MEMBER || is_component_accessor(name),
            _ => false,
        }
}

/// `component1`, `component2`, ...
fn is_component_accessor(name: &str) -> bool {
    name.strip_prefix(DATA_COMPONENT_PREFIX)
        .is_some_and(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
}
