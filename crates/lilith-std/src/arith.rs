//! Arithmetic and numeric comparison built-ins.
//! 算术与数值比较内置函数。

use lilith_eval::{BuiltinFn, Environment, Value};

use crate::args::{Args, with_args};

/// Arithmetic operators, folded left over the arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Max,
    Min,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Rem => "%",
            Op::Pow => "^",
            Op::Max => "max",
            Op::Min => "min",
        }
    }

    fn on_longs(self, a: i64, b: i64) -> Result<Value, String> {
        let overflow = || format!("integer overflow in '{}'", self.symbol());
        let n = match self {
            Op::Add => a.checked_add(b).ok_or_else(overflow)?,
            Op::Sub => a.checked_sub(b).ok_or_else(overflow)?,
            Op::Mul => a.checked_mul(b).ok_or_else(overflow)?,
            Op::Div | Op::Rem if b == 0 => return Err("divide by zero".to_string()),
            Op::Div => a.checked_div(b).ok_or_else(overflow)?,
            Op::Rem => a.checked_rem(b).ok_or_else(overflow)?,
            Op::Pow => match u32::try_from(b) {
                Ok(exp) => a.checked_pow(exp).ok_or_else(overflow)?,
                // negative or huge exponent: compute in floating point, truncate
                Err(_) => (a as f64).powf(b as f64) as i64,
            },
            Op::Max => a.max(b),
            Op::Min => a.min(b),
        };
        Ok(Value::Long(n))
    }

    fn on_doubles(self, a: f64, b: f64) -> Result<Value, String> {
        let n = match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div | Op::Rem if b == 0.0 => return Err("divide by zero".to_string()),
            Op::Div => a / b,
            Op::Rem => a % b,
            Op::Pow => a.powf(b),
            Op::Max => {
                if a > b { a } else { b }
            }
            Op::Min => {
                if a < b { a } else { b }
            }
        };
        Ok(Value::Double(n))
    }

    /// Apply to two numbers, promoting to `Double` if either one is.
    fn apply(self, x: Value, y: Value) -> Result<Value, String> {
        match (x, y) {
            (Value::Long(a), Value::Long(b)) => self.on_longs(a, b),
            (x, y) => match (x.as_f64(), y.as_f64()) {
                (Some(a), Some(b)) => self.on_doubles(a, b),
                _ => Err(format!("function '{}' expects numbers", self.symbol())),
            },
        }
    }
}

fn fold(op: Op, args: Args) -> Result<Value, String> {
    args.expect_at_least(1)?;
    if let Some(bad) = args.items.iter().find(|v| !v.is_number()) {
        return Err(args.mismatch("Number", bad));
    }

    let mut items = args.items.into_iter();
    let Some(first) = items.next() else {
        return Err(format!("function '{}' expects at least 1 argument, received 0", op.symbol()));
    };

    if op == Op::Sub && items.len() == 0 {
        return match first {
            Value::Long(n) => n
                .checked_neg()
                .map(Value::Long)
                .ok_or_else(|| "integer overflow in '-'".to_string()),
            Value::Double(n) => Ok(Value::Double(-n)),
            other => Ok(other),
        };
    }

    items.try_fold(first, |acc, next| op.apply(acc, next))
}

#[derive(Debug, Clone, Copy)]
enum Cmp {
    Gt,
    Lt,
    Ge,
    Le,
}

fn compare(cmp: Cmp, args: Args) -> Result<Value, String> {
    args.expect_count(2)?;
    let a = args.items[0].as_f64().ok_or_else(|| args.mismatch("Number", &args.items[0]))?;
    let b = args.items[1].as_f64().ok_or_else(|| args.mismatch("Number", &args.items[1]))?;
    Ok(Value::Bool(match cmp {
        Cmp::Gt => a > b,
        Cmp::Lt => a < b,
        Cmp::Ge => a >= b,
        Cmp::Le => a <= b,
    }))
}

fn add(_: &Environment, args: Value) -> Value {
    with_args("+", args, |args| fold(Op::Add, args))
}

fn sub(_: &Environment, args: Value) -> Value {
    with_args("-", args, |args| fold(Op::Sub, args))
}

fn mul(_: &Environment, args: Value) -> Value {
    with_args("*", args, |args| fold(Op::Mul, args))
}

fn div(_: &Environment, args: Value) -> Value {
    with_args("/", args, |args| fold(Op::Div, args))
}

fn rem(_: &Environment, args: Value) -> Value {
    with_args("%", args, |args| fold(Op::Rem, args))
}

fn pow(_: &Environment, args: Value) -> Value {
    with_args("^", args, |args| fold(Op::Pow, args))
}

fn max(_: &Environment, args: Value) -> Value {
    with_args("max", args, |args| fold(Op::Max, args))
}

fn min(_: &Environment, args: Value) -> Value {
    with_args("min", args, |args| fold(Op::Min, args))
}

fn gt(_: &Environment, args: Value) -> Value {
    with_args(">", args, |args| compare(Cmp::Gt, args))
}

fn lt(_: &Environment, args: Value) -> Value {
    with_args("<", args, |args| compare(Cmp::Lt, args))
}

fn ge(_: &Environment, args: Value) -> Value {
    with_args(">=", args, |args| compare(Cmp::Ge, args))
}

fn le(_: &Environment, args: Value) -> Value {
    with_args("<=", args, |args| compare(Cmp::Le, args))
}

/// Returns all arithmetic builtins.
/// 返回所有算术内置函数。
pub fn builtins() -> Vec<(&'static str, BuiltinFn)> {
    let table: [(&'static str, BuiltinFn); 12] = [
        ("+", add),
        ("-", sub),
        ("*", mul),
        ("/", div),
        ("%", rem),
        ("^", pow),
        ("max", max),
        ("min", min),
        (">", gt),
        ("<", lt),
        (">=", ge),
        ("<=", le),
    ];
    table.to_vec()
}
