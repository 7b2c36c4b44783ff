//! Runtime values.

use std::fmt;

use crate::Environment;

/// Signature of a host-provided function. The argument is always an
/// S-expression holding the already-evaluated arguments.
pub type BuiltinFn = fn(&Environment, Value) -> Value;

/// A built-in function handle.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn new(name: &'static str, func: BuiltinFn) -> Self {
        Self { name, func }
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin '{}'>", self.name)
    }
}

/// A user-defined function.
///
/// The closure environment starts empty and collects arguments as they are
/// bound. Its parent is only set when the last formal is bound, so free
/// variables in the body resolve against the caller.
pub struct Lambda {
    pub formals: Vec<String>,
    pub body: Vec<Value>,
    pub env: Environment,
}

impl Lambda {
    pub fn new(formals: Vec<String>, body: Vec<Value>) -> Self {
        Self {
            formals,
            body,
            env: Environment::new(),
        }
    }
}

impl Clone for Lambda {
    fn clone(&self) -> Self {
        Self {
            formals: self.formals.clone(),
            body: self.body.clone(),
            env: self.env.deep_copy(),
        }
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        self.formals == other.formals && self.body == other.body
    }
}

/// A runtime value.
///
/// Cloning is always deep: lists own their elements and a lambda's clone
/// gets its own copy of the closure environment.
#[derive(Clone)]
pub enum Value {
    /// A propagating failure
    Error(String),
    /// Integer value
    Long(i64),
    /// Floating point value
    Double(f64),
    Bool(bool),
    String(String),
    Symbol(String),
    Builtin(Builtin),
    Lambda(Lambda),
    /// Evaluated list: the head is applied to the rest
    SExpr(Vec<Value>),
    /// Quoted list, never evaluated implicitly
    QExpr(Vec<Value>),
}

impl Value {
    pub fn long(n: i64) -> Value {
        Value::Long(n)
    }

    pub fn double(n: f64) -> Value {
        Value::Double(n)
    }

    pub fn bool(b: bool) -> Value {
        Value::Bool(b)
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    pub fn symbol(s: impl Into<String>) -> Value {
        Value::Symbol(s.into())
    }

    /// Build an error value; pair with `format!` for formatted messages.
    pub fn error(message: impl Into<String>) -> Value {
        Value::Error(message.into())
    }

    pub fn s_expression() -> Value {
        Value::SExpr(Vec::new())
    }

    pub fn q_expression() -> Value {
        Value::QExpr(Vec::new())
    }

    /// The empty S-expression `()`, returned by forms evaluated for effect.
    pub fn unit() -> Value {
        Value::SExpr(Vec::new())
    }

    pub fn builtin_function(name: &'static str, func: BuiltinFn) -> Value {
        Value::Builtin(Builtin::new(name, func))
    }

    pub fn lambda(formals: Vec<String>, body: Vec<Value>) -> Value {
        Value::Lambda(Lambda::new(formals, body))
    }

    /// Name of the value's type as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Error(_) => "Error",
            Value::Long(_) => "Number",
            Value::Double(_) => "Decimal",
            Value::Bool(_) => "Boolean",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Builtin(_) | Value::Lambda(_) => "Function",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Long(_) | Value::Double(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Lambda(_))
    }

    /// Numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Long(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Elements of an S- or Q-expression.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_items(self) -> Option<Vec<Value>> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) => Some(items),
            _ => None,
        }
    }

    /// Number of elements; zero for anything that is not a list.
    pub fn len(&self) -> usize {
        self.items().map_or(0, <[Value]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push `value` onto the end of a list. Does nothing for non-lists.
    pub fn append(&mut self, value: Value) {
        if let Value::SExpr(items) | Value::QExpr(items) = self {
            items.push(value);
        }
    }

    /// Builder form of [`Value::append`].
    pub fn with(mut self, value: Value) -> Value {
        self.append(value);
        self
    }

    /// Remove and return the first element of a list.
    pub fn pop_front(&mut self) -> Option<Value> {
        match self {
            Value::SExpr(items) | Value::QExpr(items) if !items.is_empty() => Some(items.remove(0)),
            _ => None,
        }
    }

    /// Consume the list, keeping only the element at `index`.
    pub fn take(self, index: usize) -> Option<Value> {
        let mut items = self.into_items()?;
        if index < items.len() {
            Some(items.swap_remove(index))
        } else {
            None
        }
    }

    /// Reinterpret a Q-expression as an S-expression. Other values pass through.
    pub fn into_s_expression(self) -> Value {
        match self {
            Value::QExpr(items) => Value::SExpr(items),
            other => other,
        }
    }

    /// Reinterpret an S-expression as a Q-expression. Other values pass through.
    pub fn into_q_expression(self) -> Value {
        match self {
            Value::SExpr(items) => Value::QExpr(items),
            other => other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Long(a), Value::Double(b)) | (Value::Double(b), Value::Long(a)) => {
                *a as f64 == *b
            }
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) => a == b,
            (Value::QExpr(a), Value::QExpr(b)) => a == b,
            _ => false,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in s.chars() {
        match ch {
            '\x07' => write!(f, "\\a")?,
            '\x08' => write!(f, "\\b")?,
            '\x0C' => write!(f, "\\f")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            '\x0B' => write!(f, "\\v")?,
            '\\' => write!(f, "\\\\")?,
            '"' => write!(f, "\\\"")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

/// Positional notation with a fraction part, never an exponent: the reader
/// only takes `-?digits.digits` as a decimal.
fn write_double(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let text = n.to_string();
    if n.is_finite() && !text.contains('.') {
        write!(f, "{text}.0")
    } else {
        write!(f, "{text}")
    }
}

/// Prints the value in the form the reader accepts back, where one exists.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(msg) => write!(f, "Error: {msg}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Double(n) => write_double(f, *n),
            Value::Bool(true) => write!(f, "#t"),
            Value::Bool(false) => write!(f, "#f"),
            Value::String(s) => write_escaped(f, s),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Builtin(b) => write!(f, "<builtin '{}'>", b.name),
            Value::Lambda(lambda) => {
                write!(f, "(\\ {{{}}} ", lambda.formals.join(" "))?;
                write_list(f, '{', &lambda.body, '}')?;
                write!(f, ")")
            }
            Value::SExpr(items) => write_list(f, '(', items, ')'),
            Value::QExpr(items) => write_list(f, '{', items, '}'),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(msg) => write!(f, "Error({msg:?})"),
            Value::Long(n) => write!(f, "Long({n})"),
            Value::Double(n) => write!(f, "Double({n:?})"),
            Value::Symbol(s) => write!(f, "Symbol({s})"),
            other => write!(f, "{other}"),
        }
    }
}
