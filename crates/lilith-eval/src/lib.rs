//! Evaluator for Lilith.
//!
//! This crate holds the runtime half of the language: the [`Value`] type,
//! scoped [`Environment`]s with built-in protection, and the tree-walking
//! [`eval`] / [`call`] pair that applies built-in and user functions,
//! including partial application and variadic `&` formals.
//!
//! Failures never panic. They are returned as [`Value::Error`] and
//! propagate by short-circuiting out of the enclosing S-expression.
//!
//! Evaluation recurses on the host stack once per nested expression and per
//! function call. Unbounded recursion in user code therefore overflows the
//! host stack; that is a process fault, not an error value.

mod env;
mod eval;
pub mod value;

pub use env::{EnvError, Environment, register_builtin};
pub use eval::{call, eval};
pub use value::{Builtin, BuiltinFn, Lambda, Value};
