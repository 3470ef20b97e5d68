//! Message templates

use crate::analyzers::body_classifier::Violation;
use crate::classification::constants::{CONTRACT_READONLY_VALUE, CONTRACT_PURE_ARGUMENT};
use crate::core::{FunctionId, PurityLevel};
use crate::errors::{Error, Result};

/// Warning text for a construct that violates the declared level
pub fn violation_message(function: &str, declared: PurityLevel, violation: &Violation) -> String {
    let prefix = format!("Function \"{}\" is marked as {}", function, declared);
    match violation {
        Violation::SetsVariable { variable } => {
            format!("{} but sets variable \"{}\"", prefix, variable)
        }
        Violation::ReadsVariable { variable } => {
            format!("{} but reads variable \"{}\"", prefix, variable)
        }
        Violation::CallsWeaker { callee, .. } => {
            format!("{} but calls non-{} function \"{}\"", prefix, declared, callee)
        }
        Violation::UnrecognizedConstruct { node } => {
            format!("{} but contains unrecognized construct \"{}\"", prefix, node)
        }
    }
}

/// Info text suggesting a stronger annotation.
///
/// Only `Pure` and `Readonly` can be suggested; anything else means the
/// caller compared levels incorrectly.
pub fn suggestion_message(id: &FunctionId, function: &str, level: PurityLevel) -> Result<String> {
    match level {
        PurityLevel::Pure => Ok(format!(
            "Function \"{}\" can be marked with @Contract({} = true) to indicate it is pure",
            function, CONTRACT_PURE_ARGUMENT
        )),
        PurityLevel::Readonly => Ok(format!(
            "Function \"{}\" can be marked with @Contract(\"{}\") to indicate it is readonly",
            function, CONTRACT_READONLY_VALUE
        )),
        PurityLevel::None => Err(Error::no_suggestion_for(id, level)),
    }
}
