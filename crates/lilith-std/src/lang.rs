//! Core forms: definitions, lambdas, list primitives, conditionals and logic.
//! 核心形式：定义、lambda、列表原语、条件与逻辑运算。

use lilith_eval::{BuiltinFn, EnvError, Environment, Value, eval};

use crate::args::{Args, with_args};

const TEXT_OR_LIST: &str = "String or Q-Expression";

/// Bind each symbol of the first argument to the matching later argument.
fn assign(
    args: Args,
    bind: impl Fn(&str, Value) -> Result<(), EnvError>,
) -> Result<Value, String> {
    args.expect_at_least(1)?;
    let mut items = args.items.into_iter();
    let first = items.next().unwrap_or_else(Value::q_expression);
    let names = Args::symbols_of(args.name, first)?;

    let values: Vec<Value> = items.collect();
    if names.len() != values.len() {
        return Err(format!(
            "function '{}' argument mismatch - {} symbols, {} values",
            args.name,
            names.len(),
            values.len()
        ));
    }

    for (name, value) in names.iter().zip(values) {
        bind(name, value).map_err(|e| e.to_string())?;
    }
    Ok(Value::unit())
}

fn def(env: &Environment, args: Value) -> Value {
    with_args("def", args, |args| {
        assign(args, |name, value| env.define_global(name, value))
    })
}

fn put(env: &Environment, args: Value) -> Value {
    with_args("put", args, |args| {
        assign(args, |name, value| env.put(name, value, false))
    })
}

/// `(let {syms} values... {body})`: evaluate `body` in a child scope.
fn let_(env: &Environment, args: Value) -> Value {
    with_args("let", args, |mut args| {
        args.expect_at_least(2)?;
        let body = args.items.pop().unwrap_or_else(Value::q_expression);
        let body = Args::q_expression_of(args.name, body)?;

        let scope = env.child();
        assign(args, |name, value| scope.put(name, value, false))?;
        Ok(eval(&scope, Value::SExpr(body)))
    })
}

fn lambda(_: &Environment, args: Value) -> Value {
    with_args("\\", args, |args| {
        let name = args.name;
        let (formals, body) = args.two()?;
        let formals = Args::symbols_of(name, formals)?;
        let body = Args::q_expression_of(name, body)?;
        Ok(Value::lambda(formals, body))
    })
}

fn list(_: &Environment, args: Value) -> Value {
    args.into_q_expression()
}

/// First byte of `s` as a string. Bytes, not characters: see `len`.
fn string_head(s: &str) -> String {
    String::from_utf8_lossy(&s.as_bytes()[..s.len().min(1)]).into_owned()
}

fn string_tail(s: &str) -> String {
    String::from_utf8_lossy(s.as_bytes().get(1..).unwrap_or_default()).into_owned()
}

fn head(_: &Environment, args: Value) -> Value {
    with_args("head", args, |args| {
        let name = args.name;
        match args.one()? {
            Value::QExpr(items) => {
                let first = items.into_iter().next().ok_or_else(|| Args::empty_of(name))?;
                Ok(Value::QExpr(vec![first]))
            }
            Value::String(s) => Ok(Value::String(string_head(&s))),
            other => Err(Args::mismatch_of(name, TEXT_OR_LIST, &other)),
        }
    })
}

fn tail(_: &Environment, args: Value) -> Value {
    with_args("tail", args, |args| {
        let name = args.name;
        match args.one()? {
            Value::QExpr(mut items) => {
                if items.is_empty() {
                    return Err(Args::empty_of(name));
                }
                items.remove(0);
                Ok(Value::QExpr(items))
            }
            Value::String(s) => Ok(Value::String(string_tail(&s))),
            other => Err(Args::mismatch_of(name, TEXT_OR_LIST, &other)),
        }
    })
}

fn init(_: &Environment, args: Value) -> Value {
    with_args("init", args, |args| {
        let name = args.name;
        let mut items = Args::q_expression_of(name, args.one()?)?;
        if items.pop().is_none() {
            return Err(Args::empty_of(name));
        }
        Ok(Value::QExpr(items))
    })
}

/// Join Q-expressions, or concatenate strings. All arguments must be of one kind.
fn join(_: &Environment, args: Value) -> Value {
    with_args("join", args, |args| {
        args.expect_at_least(1)?;
        let first = &args.items[0];
        for item in &args.items {
            if !matches!(item, Value::QExpr(_) | Value::String(_)) {
                return Err(args.mismatch(TEXT_OR_LIST, item));
            }
            if item.type_name() != first.type_name() {
                return Err(format!(
                    "function 'join' type mismatch - inconsistent argument types {} vs {}",
                    first.type_name(),
                    item.type_name()
                ));
            }
        }

        let mut items = args.items.into_iter();
        match items.next() {
            Some(Value::String(mut joined)) => {
                for item in items {
                    if let Value::String(s) = item {
                        joined.push_str(&s);
                    }
                }
                Ok(Value::String(joined))
            }
            Some(Value::QExpr(mut joined)) => {
                for item in items {
                    if let Value::QExpr(more) = item {
                        joined.extend(more);
                    }
                }
                Ok(Value::QExpr(joined))
            }
            _ => Ok(Value::q_expression()),
        }
    })
}

/// Element count of a Q-expression, or byte length of a string.
fn len(_: &Environment, args: Value) -> Value {
    with_args("len", args, |args| {
        let name = args.name;
        let n = match args.one()? {
            Value::QExpr(items) => items.len(),
            Value::String(s) => s.len(),
            other => return Err(Args::mismatch_of(name, TEXT_OR_LIST, &other)),
        };
        i64::try_from(n)
            .map(Value::Long)
            .map_err(|_| "length does not fit in a number".to_string())
    })
}

fn cons(_: &Environment, args: Value) -> Value {
    with_args("cons", args, |args| {
        let name = args.name;
        let (value, list) = args.two()?;
        let mut items = Args::q_expression_of(name, list)?;
        items.insert(0, value);
        Ok(Value::QExpr(items))
    })
}

fn eval_(env: &Environment, args: Value) -> Value {
    with_args("eval", args, |args| {
        let name = args.name;
        let body = Args::q_expression_of(name, args.one()?)?;
        Ok(eval(env, Value::SExpr(body)))
    })
}

/// `(if cond {then} {else})`
fn if_(env: &Environment, args: Value) -> Value {
    with_args("if", args, |args| {
        args.expect_count(3)?;
        let mut items = args.items.into_iter();
        let (Some(cond), Some(then), Some(other)) = (items.next(), items.next(), items.next())
        else {
            return Err("function 'if' expects 3 arguments".to_string());
        };
        let cond = match cond {
            Value::Bool(b) => b,
            v => return Err(Args::mismatch_of("if", "Boolean", &v)),
        };
        let then = Args::q_expression_of("if", then)?;
        let other = Args::q_expression_of("if", other)?;
        let branch = if cond { then } else { other };
        Ok(eval(env, Value::SExpr(branch)))
    })
}

/// Structural equality across all arguments. Numbers compare across
/// `Long`/`Double`; other types must match.
fn equal(_: &Environment, args: Value) -> Value {
    with_args("=", args, |args| {
        args.expect_at_least(1)?;
        let first = &args.items[0];
        for item in &args.items[1..] {
            let consistent = (first.is_number() && item.is_number())
                || first.type_name() == item.type_name();
            if !consistent {
                return Err(format!(
                    "function '=' type mismatch - inconsistent argument types {} vs {}",
                    first.type_name(),
                    item.type_name()
                ));
            }
        }
        Ok(Value::Bool(args.items[1..].iter().all(|item| item == first)))
    })
}

fn booleans(args: &Args) -> Result<Vec<bool>, String> {
    args.items
        .iter()
        .map(|item| match item {
            Value::Bool(b) => Ok(*b),
            other => Err(args.mismatch("Boolean", other)),
        })
        .collect()
}

fn and(_: &Environment, args: Value) -> Value {
    with_args("and", args, |args| {
        Ok(Value::Bool(booleans(&args)?.into_iter().all(|b| b)))
    })
}

fn or(_: &Environment, args: Value) -> Value {
    with_args("or", args, |args| {
        Ok(Value::Bool(booleans(&args)?.into_iter().any(|b| b)))
    })
}

fn not(_: &Environment, args: Value) -> Value {
    with_args("not", args, |args| {
        args.expect_count(1)?;
        match booleans(&args)?.first() {
            Some(b) => Ok(Value::Bool(!b)),
            None => Err(args.empty()),
        }
    })
}

/// Returns all core builtins.
/// 返回所有核心内置函数。
pub fn builtins() -> Vec<(&'static str, BuiltinFn)> {
    let table: [(&'static str, BuiltinFn); 17] = [
        ("def", def),
        ("put", put),
        ("let", let_),
        ("\\", lambda),
        ("list", list),
        ("head", head),
        ("tail", tail),
        ("init", init),
        ("join", join),
        ("len", len),
        ("cons", cons),
        ("eval", eval_),
        ("if", if_),
        ("=", equal),
        ("and", and),
        ("or", or),
        ("not", not),
    ];
    table.to_vec()
}
