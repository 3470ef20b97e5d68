//! Factory functions for IR nodes and declarations.
//!
//! | Helper | Builds |
//! |--------|--------|
//! | [`function`] | a [`FunctionDecl`] through [`FunctionBuilder`] |
//! | [`local_var`] | a [`VariableRef`] owned by some function |
//! | [`call`] / [`call_of`] | a call node / the bare [`Call`] |
//! | [`member_fn`], [`pure_fn`], [`readonly_fn`], [`top_level_fn`] | callee signatures |
//! | [`module_of`] | a one-file [`Module`] |
//!
//! Every node is created at offset 0; use [`at`] to place it elsewhere.

use crate::classification::constants::{
    CONTRACT_ANNOTATION, CONTRACT_PURE_ARGUMENT, CONTRACT_READONLY_VALUE,
    CONTRACT_VALUE_ARGUMENT,
};
use crate::core::FunctionId;
use crate::ir::{
    Annotation, Call, Expr, ExprKind, FunctionDecl, FunctionSignature, Literal, Module,
    OwnerType, Parameter, SourceFile, TypeKind, VariableRef,
};

/// `@Contract(pure = true)`
pub fn contract_pure() -> Annotation {
    Annotation::new(CONTRACT_ANNOTATION).with_bool(CONTRACT_PURE_ARGUMENT, true)
}

/// `@Contract("readonly")`
pub fn contract_readonly() -> Annotation {
    Annotation::new(CONTRACT_ANNOTATION)
        .with_string(CONTRACT_VALUE_ARGUMENT, CONTRACT_READONLY_VALUE)
}

/// Fluent builder for function declarations.
#[derive(Debug, Clone)]
pub struct FunctionBuilder {
    decl: FunctionDecl,
}

/// Start a declaration; the simple name is the last segment of `id`
pub fn function(id: &str) -> FunctionBuilder {
    let id = FunctionId::from(id);
    let name = id.simple_name().to_string();
    FunctionBuilder {
        decl: FunctionDecl {
            id,
            signature: FunctionSignature::new(name),
            parameters: Vec::new(),
            body: None,
            offset: 0,
        },
    }
}

impl FunctionBuilder {
    pub fn pure(mut self) -> Self {
        self.decl.signature.annotations.push(contract_pure());
        self
    }

    pub fn readonly(mut self) -> Self {
        self.decl.signature.annotations.push(contract_readonly());
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.decl.signature.annotations.push(annotation);
        self
    }

    pub fn owner(mut self, name: &str, kind: TypeKind) -> Self {
        self.decl.signature.owner = Some(OwnerType::new(name, kind));
        self
    }

    /// Override the simple name derived from the id
    pub fn named(mut self, name: &str) -> Self {
        self.decl.signature.name = name.to_string();
        self
    }

    pub fn param(mut self, name: &str) -> Self {
        self.decl.parameters.push(Parameter {
            name: name.to_string(),
            type_name: None,
        });
        self
    }

    pub fn body(mut self, body: Expr) -> Self {
        self.decl.body = Some(body);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.decl.offset = offset;
        self
    }

    pub fn build(self) -> FunctionDecl {
        self.decl
    }
}

/// Variable declared in the body of `owner`
pub fn local_var(name: &str, owner: &str, reassignable: bool) -> VariableRef {
    VariableRef::new(name, owner, reassignable)
}

/// Member of `owner`
pub fn member_fn(name: &str, owner: &str) -> FunctionSignature {
    FunctionSignature::new(name).with_owner(OwnerType::new(owner, TypeKind::Class))
}

/// Top-level function without annotations
pub fn top_level_fn(name: &str) -> FunctionSignature {
    FunctionSignature::new(name)
}

/// Top-level function annotated pure
pub fn pure_fn(name: &str) -> FunctionSignature {
    FunctionSignature::new(name).with_annotation(contract_pure())
}

/// Top-level function annotated readonly
pub fn readonly_fn(name: &str) -> FunctionSignature {
    FunctionSignature::new(name).with_annotation(contract_readonly())
}

/// Move a node to `offset`
pub fn at(offset: usize, mut expr: Expr) -> Expr {
    expr.offset = offset;
    expr
}

pub fn const_int(value: i64) -> Expr {
    Expr::new(
        0,
        ExprKind::Const {
            value: Literal::Int(value),
        },
    )
}

pub fn const_string(value: &str) -> Expr {
    Expr::new(
        0,
        ExprKind::Const {
            value: Literal::String(value.to_string()),
        },
    )
}

pub fn get(variable: &VariableRef) -> Expr {
    Expr::new(
        0,
        ExprKind::GetValue {
            variable: variable.clone(),
        },
    )
}

pub fn set(variable: &VariableRef, value: Expr) -> Expr {
    Expr::new(
        0,
        ExprKind::SetValue {
            variable: variable.clone(),
            value: Box::new(value),
        },
    )
}

pub fn call_of(callee: FunctionSignature, receiver: Option<Expr>, arguments: Vec<Expr>) -> Call {
    Call {
        callee,
        receiver: receiver.map(Box::new),
        arguments,
    }
}

pub fn call(callee: FunctionSignature, receiver: Option<Expr>, arguments: Vec<Expr>) -> Expr {
    Expr::new(0, ExprKind::Call(call_of(callee, receiver, arguments)))
}

pub fn ret(value: Expr) -> Expr {
    Expr::new(
        0,
        ExprKind::Return {
            value: Box::new(value),
        },
    )
}

pub fn cast(operand: Expr) -> Expr {
    Expr::new(
        0,
        ExprKind::TypeOperator {
            operand: Box::new(operand),
            type_name: None,
        },
    )
}

pub fn block(statements: Vec<Expr>) -> Expr {
    Expr::new(0, ExprKind::Block { statements })
}

pub fn declare(variable: &VariableRef, initializer: Option<Expr>) -> Expr {
    Expr::new(
        0,
        ExprKind::Declare {
            variable: variable.clone(),
            initializer: initializer.map(Box::new),
        },
    )
}

pub fn unhandled(node: &str, children: Vec<Expr>) -> Expr {
    Expr::new(
        0,
        ExprKind::Unhandled {
            node: node.to_string(),
            children,
        },
    )
}

/// Module with a single file holding `functions`
pub fn module_of(path: &str, text: &str, functions: Vec<FunctionDecl>) -> Module {
    let file = functions
        .into_iter()
        .fold(SourceFile::new(path).with_text(text), |file, f| {
            file.with_function(f)
        });
    Module::new("test").with_file(file)
}
