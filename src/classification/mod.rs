//! Purity classification table
//!
//! Answers, for any visible declaration, which purity it *claims*: through an
//! explicit annotation, through membership of a type with known purity, or
//! through the set of trusted-pure function names supplied by configuration.
//! The table is built once before analysis and never mutated afterwards, so a
//! single instance can be shared by any number of classifier runs.
//!
//! # Example
//!
//! ```
//! use puritycheck::classification::ClassificationTable;
//! use puritycheck::core::PurityLevel;
//! use puritycheck::ir::{FunctionSignature, OwnerType, TypeKind};
//!
//! let table = ClassificationTable::new();
//! let plus = FunctionSignature::new("plus")
//!     .with_owner(OwnerType::new("kotlin.Int", TypeKind::Class));
//! assert_eq!(table.declared_level(&plus), PurityLevel::Pure);
//! ```

pub mod constants;
mod synthesized;

pub use synthesized::is_synthesized;

use std::collections::HashSet;

use self::constants::{
    CONSTRUCTOR_NAME, CONST_EVALUATION_ANNOTATION, CONTRACT_ANNOTATION, CONTRACT_PURE_ARGUMENT,
    CONTRACT_READONLY_VALUE, CONTRACT_VALUE_ARGUMENT, ENCAPSULATED_STATEFUL_TYPES, PURE_TYPES,
    READONLY_TYPES,
};
use crate::core::PurityLevel;
use crate::ir::{AnnotationLookup, FunctionSignature};

/// Capability a type is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCapability {
    Pure,
    Readonly,
    EncapsulatedStateful,
}

/// Static knowledge base queried during analysis.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    pure_types: HashSet<String>,
    readonly_types: HashSet<String>,
    encapsulated_types: HashSet<String>,
    trusted_pure_functions: HashSet<String>,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationTable {
    /// Table holding only the built-in knowledge
    pub fn new() -> Self {
        Self::with_trusted_functions(std::iter::empty::<String>())
    }

    /// Table with additional fully qualified function names treated as pure
    pub fn with_trusted_functions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let owned =
            |types: &[&str]| -> HashSet<String> { types.iter().map(|t| t.to_string()).collect() };
        let trusted_pure_functions: HashSet<String> = names
            .into_iter()
            .map(Into::into)
            .map(|name: String| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        log::debug!(
            "Classification table built with {} trusted pure functions",
            trusted_pure_functions.len()
        );

        Self {
            pure_types: owned(PURE_TYPES),
            readonly_types: owned(READONLY_TYPES),
            encapsulated_types: owned(ENCAPSULATED_STATEFUL_TYPES),
            trusted_pure_functions,
        }
    }

    /// The level a declaration claims.
    ///
    /// Explicit annotations are consulted first and always win; then type
    /// membership, trusted names and constant-evaluation intrinsics. A
    /// declaration without an owner type can only match annotation and name
    /// rules.
    pub fn declared_level(&self, signature: &FunctionSignature) -> PurityLevel {
        if is_annotated_pure(signature) {
            return PurityLevel::Pure;
        }
        if is_annotated_readonly(signature) {
            return PurityLevel::Readonly;
        }
        if self.owner_has(signature, TypeCapability::Pure) {
            return PurityLevel::Pure;
        }
        if self.owner_has(signature, TypeCapability::Readonly) {
            return PurityLevel::Readonly;
        }
        if self.is_trusted_pure(signature) {
            return PurityLevel::Pure;
        }
        if signature.has_annotation(CONST_EVALUATION_ANNOTATION) {
            return PurityLevel::Pure;
        }
        PurityLevel::None
    }

    /// Check if calls on a locally created receiver of this member's type may
    /// be treated as pure
    pub fn is_encapsulated_stateful(&self, signature: &FunctionSignature) -> bool {
        self.owner_has(signature, TypeCapability::EncapsulatedStateful)
    }

    /// Constructor of an encapsulated-stateful type: the call creates a fresh
    /// instance nobody else can observe yet
    pub fn creates_encapsulated_instance(&self, signature: &FunctionSignature) -> bool {
        signature.name == CONSTRUCTOR_NAME && self.is_encapsulated_stateful(signature)
    }

    pub fn is_synthesized(&self, signature: &FunctionSignature) -> bool {
        is_synthesized(signature)
    }

    /// Capabilities a type is registered with
    pub fn capabilities(&self, type_name: &str) -> Vec<TypeCapability> {
        [
            (TypeCapability::Pure, &self.pure_types),
            (TypeCapability::Readonly, &self.readonly_types),
            (TypeCapability::EncapsulatedStateful, &self.encapsulated_types),
        ]
        .into_iter()
        .filter(|(_, set)| set.contains(type_name))
        .map(|(capability, _)| capability)
        .collect()
    }

    /// Every type registered with `capability`, sorted
    pub fn types_with(&self, capability: TypeCapability) -> Vec<&str> {
        let set = match capability {
            TypeCapability::Pure => &self.pure_types,
            TypeCapability::Readonly => &self.readonly_types,
            TypeCapability::EncapsulatedStateful => &self.encapsulated_types,
        };
        let mut types: Vec<&str> = set.iter().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn trusted_pure_functions(&self) -> impl Iterator<Item = &str> {
        self.trusted_pure_functions.iter().map(String::as_str)
    }

    fn owner_has(&self, signature: &FunctionSignature, capability: TypeCapability) -> bool {
        let Some(owner) = signature.owner_name() else {
            return false;
        };
        match capability {
            TypeCapability::Pure => self.pure_types.contains(owner),
            TypeCapability::Readonly => self.readonly_types.contains(owner),
            TypeCapability::EncapsulatedStateful => self.encapsulated_types.contains(owner),
        }
    }

    fn is_trusted_pure(&self, signature: &FunctionSignature) -> bool {
        !self.trusted_pure_functions.is_empty()
            && self
                .trusted_pure_functions
                .contains(&signature.qualified_name())
    }
}

fn is_annotated_pure(signature: &FunctionSignature) -> bool {
    signature.bool_argument(CONTRACT_ANNOTATION, CONTRACT_PURE_ARGUMENT) == Some(true)
}

fn is_annotated_readonly(signature: &FunctionSignature) -> bool {
    signature.string_argument(CONTRACT_ANNOTATION, CONTRACT_VALUE_ARGUMENT)
        == Some(CONTRACT_READONLY_VALUE)
}
