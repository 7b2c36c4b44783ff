//! Argument checking shared by the built-ins.

use lilith_eval::Value;

/// Evaluated arguments of one built-in call, tagged with the built-in's name
/// for error messages.
pub(crate) struct Args {
    pub name: &'static str,
    pub items: Vec<Value>,
}

impl Args {
    pub fn expect_count(&self, expected: usize) -> Result<(), String> {
        if self.items.len() == expected {
            Ok(())
        } else {
            Err(format!(
                "function '{}' expects {} {}, received {}",
                self.name,
                expected,
                plural(expected),
                self.items.len()
            ))
        }
    }

    pub fn expect_at_least(&self, minimum: usize) -> Result<(), String> {
        if self.items.len() >= minimum {
            Ok(())
        } else {
            Err(format!(
                "function '{}' expects at least {} {}, received {}",
                self.name,
                minimum,
                plural(minimum),
                self.items.len()
            ))
        }
    }

    pub fn mismatch(&self, expected: &str, received: &Value) -> String {
        Args::mismatch_of(self.name, expected, received)
    }

    pub fn empty(&self) -> String {
        Args::empty_of(self.name)
    }

    /// Take the single argument, after checking the count.
    pub fn one(mut self) -> Result<Value, String> {
        self.expect_count(1)?;
        Ok(self.items.remove(0))
    }

    /// Take the two arguments, after checking the count.
    pub fn two(self) -> Result<(Value, Value), String> {
        self.expect_count(2)?;
        let mut items = self.items.into_iter();
        match (items.next(), items.next()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(format!("function '{}' expects 2 arguments", self.name)),
        }
    }

    pub fn mismatch_of(name: &str, expected: &str, received: &Value) -> String {
        format!(
            "function '{}' type mismatch - expected {}, received {}",
            name,
            expected,
            received.type_name()
        )
    }

    pub fn empty_of(name: &str) -> String {
        format!("empty q-expression passed to '{name}'")
    }

    /// Unwrap a Q-expression argument of the built-in `name`.
    pub fn q_expression_of(name: &str, value: Value) -> Result<Vec<Value>, String> {
        match value {
            Value::QExpr(items) => Ok(items),
            other => Err(Args::mismatch_of(name, "Q-Expression", &other)),
        }
    }

    /// Unwrap a string argument of the built-in `name`.
    pub fn string_of(name: &str, value: Value) -> Result<String, String> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Args::mismatch_of(name, "String", &other)),
        }
    }

    /// Names from a Q-expression of symbols.
    pub fn symbols_of(name: &str, value: Value) -> Result<Vec<String>, String> {
        Args::q_expression_of(name, value)?
            .into_iter()
            .map(|item| match item {
                Value::Symbol(symbol) => Ok(symbol),
                other => Err(Args::mismatch_of(name, "Symbol", &other)),
            })
            .collect()
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "argument" } else { "arguments" }
}

/// Run a built-in body, turning its `Err` message into an error value.
pub(crate) fn with_args(
    name: &'static str,
    args: Value,
    body: impl FnOnce(Args) -> Result<Value, String>,
) -> Value {
    let items = args.into_items().unwrap_or_default();
    body(Args { name, items }).unwrap_or_else(Value::Error)
}
