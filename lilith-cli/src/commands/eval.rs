//! The `lilith eval` command.

use lilith_eval::Value;
use lilith_reader::parse;
use lilith_std::Interpreter;

use super::{Options, interpreter};
use crate::output;

pub fn run(expr: &str, options: &Options) -> Result<(), String> {
    let interp = interpreter(options)?;
    let result = evaluate(&interp, expr)?;
    if !options.quiet {
        output::value(&result);
    }
    Ok(())
}

/// Parse and evaluate `expr`; a parse error is rendered before failing.
fn evaluate(interp: &Interpreter, expr: &str) -> Result<Value, String> {
    let value = match parse(expr) {
        Ok(value) => value,
        Err(e) => {
            output::diagnostic(expr, "<eval>", &e.to_diagnostic());
            return Err("parse error".to_string());
        }
    };

    match interp.eval(value) {
        Value::Error(message) => Err(message),
        result => Ok(result),
    }
}
