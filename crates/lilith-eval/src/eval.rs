//! Tree-walking evaluation and function application.
//! 树遍历求值与函数调用。

use std::collections::VecDeque;

use crate::env::Environment;
use crate::value::{Lambda, Value};

/// Formal that collects the remaining arguments into a Q-expression.
const VARIADIC: &str = "&";

/// Evaluate `value` in `env`.
/// 在 `env` 中对 `value` 求值。
///
/// Symbols are looked up, S-expressions are evaluated and applied, and every
/// other value evaluates to itself.
pub fn eval(env: &Environment, value: Value) -> Value {
    match value {
        Value::Symbol(name) => env.get(&name),
        Value::SExpr(items) => eval_s_expression(env, items),
        other => other,
    }
}

fn eval_s_expression(env: &Environment, items: Vec<Value>) -> Value {
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        let value = eval(env, item);
        if value.is_error() {
            return value;
        }
        values.push(value);
    }

    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return Value::SExpr(Vec::new());
    };

    // `(x)` means `x`, except a lone built-in is still called: `(list)` is `{}`.
    if values.len() == 0 && !matches!(first, Value::Builtin(_)) {
        return first;
    }

    if !first.is_function() {
        return Value::error("s-expression does not start with function");
    }

    call(env, first, values.collect())
}

/// Apply `function` to already-evaluated `args`, with `env` as the caller.
/// 以 `env` 作为调用方，将 `function` 应用于已求值的 `args`。
pub fn call(env: &Environment, function: Value, args: Vec<Value>) -> Value {
    match function {
        Value::Builtin(builtin) => {
            tracing::trace!(name = builtin.name, argc = args.len(), "call builtin");
            (builtin.func)(env, Value::SExpr(args))
        }
        Value::Lambda(lambda) => apply(env, lambda, args),
        other => Value::error(format!(
            "cannot call a value of type {}",
            other.type_name()
        )),
    }
}

/// Bind `args` to the lambda's formals left to right. Runs the body once every
/// formal is bound, otherwise returns the partially applied function.
fn apply(caller: &Environment, lambda: Lambda, args: Vec<Value>) -> Value {
    let Lambda { formals, body, env } = lambda;
    let expected = formals.len();
    let received = args.len();
    // A partially applied function already carries its bound prefix.
    let more = if env.binding_count() > 0 { " more" } else { "" };

    let mut formals: VecDeque<String> = formals.into();
    let mut args: VecDeque<Value> = args.into();

    while let Some(arg) = args.pop_front() {
        let Some(formal) = formals.pop_front() else {
            return Value::error(format!(
                "too many arguments - expected {expected}{more}, received {received}"
            ));
        };

        if formal == VARIADIC {
            let Some(rest) = single_formal_after_variadic(&mut formals) else {
                return malformed_variadic();
            };
            let mut collected = vec![arg];
            collected.extend(args.drain(..));
            tracing::debug!(rest = %rest, count = collected.len(), "bind variadic");
            if let Err(e) = env.put(&rest, Value::QExpr(collected), false) {
                return Value::error(e.to_string());
            }
            break;
        }

        if let Err(e) = env.put(&formal, arg, false) {
            return Value::error(e.to_string());
        }
    }

    // Arguments ran out with only `& rest` left: the rest is empty.
    if formals.front().is_some_and(|f| f == VARIADIC) {
        formals.pop_front();
        let Some(rest) = single_formal_after_variadic(&mut formals) else {
            return malformed_variadic();
        };
        if let Err(e) = env.put(&rest, Value::QExpr(Vec::new()), false) {
            return Value::error(e.to_string());
        }
    }

    if !formals.is_empty() {
        tracing::debug!(remaining = formals.len(), "partial application");
        return Value::Lambda(Lambda {
            formals: formals.into(),
            body,
            env,
        });
    }

    env.set_parent(caller);
    eval(&env, Value::SExpr(body))
}

/// The formal following `&`, provided it is the last one.
fn single_formal_after_variadic(formals: &mut VecDeque<String>) -> Option<String> {
    if formals.len() == 1 {
        formals.pop_front()
    } else {
        None
    }
}

fn malformed_variadic() -> Value {
    Value::error("function format invalid - symbol '&' not followed by single symbol")
}
