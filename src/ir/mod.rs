//! Host-supplied intermediate representation.
//!
//! A [`Module`] is what the host compiler hands to the checker: source files,
//! each with a line table and the function declarations found in it. Bodies
//! are immutable [`Expr`] trees; the checker only reads them.
//!
//! The whole representation is serde-deserializable so that hosts can hand
//! over a JSON dump instead of linking against the library.

pub mod annotations;
pub mod expr;
pub mod source;

pub use annotations::{Annotation, AnnotationLookup, AnnotationValue};
pub use expr::{Call, Expr, ExprKind, Literal, VariableRef};
pub use source::{DeclarationKey, Module, SourceFile, SourceLocation};

use serde::{Deserialize, Serialize};

use crate::core::FunctionId;

/// Kind of the type that declares a member function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    /// Product type with generated component and copy members
    Data,
    Object,
}

/// The type a member function belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerType {
    /// Fully qualified type name, e.g. `kotlin.collections.ArrayList`
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
}

impl OwnerType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// What a caller can see of a function: enough to compute its declared level
/// without looking at its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    /// Declaring type; `None` for top-level, local and anonymous functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: OwnerType) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.name.as_str())
    }

    pub fn owner_kind(&self) -> Option<TypeKind> {
        self.owner.as_ref().map(|o| o.kind)
    }

    /// `Owner.name` for members, the bare name otherwise
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}.{}", owner.name, self.name),
            None => self.name.clone(),
        }
    }
}

impl AnnotationLookup for FunctionSignature {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

/// Formal parameter of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// A function declaration with its (optional) body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub id: FunctionId,
    #[serde(flatten)]
    pub signature: FunctionSignature,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Absent for abstract and interface members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Expr>,
    /// Byte offset of the declaration in its source file
    #[serde(default)]
    pub offset: usize,
}

impl FunctionDecl {
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// A parameter of this function seen as a variable of its body
    pub fn parameter_ref(&self, name: &str) -> Option<VariableRef> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| VariableRef::parameter(p.name.clone(), self.id.clone()))
    }
}
