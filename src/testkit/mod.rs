//! Testing infrastructure for puritycheck.
//!
//! Builders for IR trees so tests can describe a function body in a few lines
//! instead of a JSON dump:
//!
//! ```rust
//! use puritycheck::testkit::{function, local_var, ret, get};
//!
//! let external = local_var("external", "sample.main", true);
//! let decl = function("sample.main.returnExternal")
//!     .pure()
//!     .body(ret(get(&external)))
//!     .build();
//! assert!(decl.has_body());
//! ```
//!
//! The helpers are public so that integration tests and benches share them.

pub mod helpers;

// proptest is a dev-dependency
#[cfg(test)]
pub mod proptest_generators;

pub use helpers::{
    at, block, call, call_of, cast, const_int, const_string, contract_pure, contract_readonly,
    declare, function, get, local_var, member_fn, module_of, pure_fn, readonly_fn, ret, set,
    top_level_fn, unhandled, FunctionBuilder,
};
