//! Expression tree of a function body.

use serde::{Deserialize, Serialize};

use super::FunctionSignature;
use crate::core::FunctionId;

/// A local variable or parameter as seen from a use site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRef {
    pub name: String,
    /// Function whose body declares the variable
    pub owner: FunctionId,
    /// `var` rather than `val`; parameters are never reassignable
    #[serde(default)]
    pub reassignable: bool,
    /// Formal parameter of the owner rather than a local declared in its body
    #[serde(default)]
    pub parameter: bool,
}

impl VariableRef {
    pub fn new(name: impl Into<String>, owner: impl Into<FunctionId>, reassignable: bool) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            reassignable,
            parameter: false,
        }
    }

    pub fn parameter(name: impl Into<String>, owner: impl Into<FunctionId>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            reassignable: false,
            parameter: true,
        }
    }

    pub fn is_owned_by(&self, function: &FunctionId) -> bool {
        &self.owner == function
    }

    /// Declared in `function`'s body, so it was created there and not handed in
    pub fn is_created_in(&self, function: &FunctionId) -> bool {
        !self.parameter && self.is_owned_by(function)
    }
}

/// Literal values carried by constant nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Call to a visible declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub callee: FunctionSignature,
    /// Dispatch receiver, when the callee is a member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Box<Expr>>,
    #[serde(default)]
    pub arguments: Vec<Expr>,
}

/// One node of a body tree together with its source offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Byte offset of the node start in its source file
    #[serde(default)]
    pub offset: usize,
    #[serde(flatten)]
    pub kind: ExprKind,
}

/// Closed set of node kinds the classifier reasons about.
///
/// `Unhandled` is the explicit catch-all: anything the host cannot express as
/// one of the other variants arrives here and is treated as impure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKind {
    Const {
        value: Literal,
    },
    GetValue {
        variable: VariableRef,
    },
    SetValue {
        variable: VariableRef,
        value: Box<Expr>,
    },
    Call(Call),
    Return {
        value: Box<Expr>,
    },
    /// Cast, type check or non-null assertion around one operand
    TypeOperator {
        operand: Box<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_name: Option<String>,
    },
    /// Statement sequence
    Block {
        #[serde(default)]
        statements: Vec<Expr>,
    },
    /// Local variable declaration
    Declare {
        variable: VariableRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initializer: Option<Box<Expr>>,
    },
    Unhandled {
        /// Host name of the node kind, e.g. `IrTry`
        node: String,
        #[serde(default)]
        children: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(offset: usize, kind: ExprKind) -> Self {
        Self { offset, kind }
    }

    /// Direct sub-expressions in evaluation order
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Const { .. } | ExprKind::GetValue { .. } => Vec::new(),
            ExprKind::SetValue { value, .. } => vec![value.as_ref()],
            ExprKind::Call(call) => call
                .receiver
                .as_deref()
                .into_iter()
                .chain(call.arguments.iter())
                .collect(),
            ExprKind::Return { value } => vec![value.as_ref()],
            ExprKind::TypeOperator { operand, .. } => vec![operand.as_ref()],
            ExprKind::Block { statements } => statements.iter().collect(),
            ExprKind::Declare { initializer, .. } => initializer.as_deref().into_iter().collect(),
            ExprKind::Unhandled { children, .. } => children.iter().collect(),
        }
    }

    /// Short description of the node kind, used in log output
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            ExprKind::Const { .. } => "const",
            ExprKind::GetValue { .. } => "get_value",
            ExprKind::SetValue { .. } => "set_value",
            ExprKind::Call(_) => "call",
            ExprKind::Return { .. } => "return",
            ExprKind::TypeOperator { .. } => "type_operator",
            ExprKind::Block { .. } => "block",
            ExprKind::Declare { .. } => "declare",
            ExprKind::Unhandled { node, .. } => node,
        }
    }

    /// Number of nodes in this tree, including the root
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }
}
