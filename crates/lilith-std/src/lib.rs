//! Standard library for Lilith.
//! Lilith 标准库。
//!
//! Provides the built-in functions, the bundled prelude, search-path
//! configuration and the [`Interpreter`] facade that wires them together.
//! 提供内置函数、内置 prelude、搜索路径配置，以及将它们组合起来的 [`Interpreter`]。
//!
//! Built-ins are grouped by concern:
//! - `arith`: `+ - * / % ^ max min > < >= <=`
//! - `lang`: definitions, lambdas, list primitives, `if`, `=`, logic
//! - `io`: `load print error read env try file->string`
//! - `types`: `string? number? decimal? boolean? q-expression? s-expression? function?`

mod args;
pub mod arith;
pub mod config;
pub mod lang;
pub mod interpreter;
pub mod io;
pub mod path;
pub mod types;

pub use config::{Config, PATH_VAR};
pub use interpreter::{InitError, Interpreter};
pub use io::eval_source;
pub use path::{LOAD_PATH, LoadError, resolve};

use lilith_eval::{BuiltinFn, EnvError, Environment, register_builtin};

/// All built-in functions.
/// 所有内置函数。
pub fn builtins() -> Vec<(&'static str, BuiltinFn)> {
    let mut all = Vec::new();
    all.extend(arith::builtins());
    all.extend(lang::builtins());
    all.extend(io::builtins());
    all.extend(types::builtins());
    all
}

/// Register every built-in in `env`, protected from redefinition.
/// 在 `env` 中注册所有内置函数，并防止被重新定义。
pub fn register_all(env: &Environment) -> Result<(), EnvError> {
    for (name, func) in builtins() {
        register_builtin(env, name, func)?;
    }
    tracing::debug!(count = env.binding_count(), "registered built-ins");
    Ok(())
}
