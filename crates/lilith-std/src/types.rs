//! Type predicates.

use lilith_eval::{BuiltinFn, Environment, Value};

use crate::args::with_args;

fn check(name: &'static str, args: Value, matches: fn(&Value) -> bool) -> Value {
    with_args(name, args, |args| {
        args.expect_count(1)?;
        Ok(Value::Bool(matches(&args.items[0])))
    })
}

fn is_string(_: &Environment, args: Value) -> Value {
    check("string?", args, |v| matches!(v, Value::String(_)))
}

/// Integers only; `decimal?` covers doubles.
fn is_number(_: &Environment, args: Value) -> Value {
    check("number?", args, |v| matches!(v, Value::Long(_)))
}

fn is_decimal(_: &Environment, args: Value) -> Value {
    check("decimal?", args, |v| matches!(v, Value::Double(_)))
}

fn is_boolean(_: &Environment, args: Value) -> Value {
    check("boolean?", args, |v| matches!(v, Value::Bool(_)))
}

fn is_q_expression(_: &Environment, args: Value) -> Value {
    check("q-expression?", args, |v| matches!(v, Value::QExpr(_)))
}

fn is_s_expression(_: &Environment, args: Value) -> Value {
    check("s-expression?", args, |v| matches!(v, Value::SExpr(_)))
}

fn is_function(_: &Environment, args: Value) -> Value {
    check("function?", args, Value::is_function)
}

/// Returns all type predicate builtins.
/// 返回所有类型判断内置函数。
pub fn builtins() -> Vec<(&'static str, BuiltinFn)> {
    let table: [(&'static str, BuiltinFn); 7] = [
        ("string?", is_string),
        ("number?", is_number),
        ("decimal?", is_decimal),
        ("boolean?", is_boolean),
        ("q-expression?", is_q_expression),
        ("s-expression?", is_s_expression),
        ("function?", is_function),
    ];
    table.to_vec()
}
