//! A ready-to-use interpreter: built-ins, search path and prelude.
//! 开箱即用的解释器：内置函数、搜索路径与 prelude。

use std::path::Path;

use lilith_eval::{EnvError, Environment, Value, eval};
use lilith_reader::read;
use thiserror::Error;

use crate::config::Config;
use crate::io::eval_source;
use crate::path::{LOAD_PATH, read_source, search_path_value};
use crate::register_all;

const PRELUDE: &str = include_str!("prelude.llth");

/// Errors from setting up an interpreter.
/// 初始化解释器时的错误。
#[derive(Debug, Error)]
pub enum InitError {
    #[error("cannot register built-ins: {0}")]
    Env(#[from] EnvError),
    #[error("prelude failed: {0}")]
    Prelude(String),
}

/// Owns the root environment of a Lilith session.
pub struct Interpreter {
    env: Environment,
    config: Config,
}

impl Interpreter {
    /// Create an interpreter with every built-in registered, the search path
    /// bound and, unless disabled, the prelude evaluated.
    /// 创建解释器：注册全部内置函数，绑定搜索路径，并按配置执行 prelude。
    pub fn new(config: Config) -> Result<Self, InitError> {
        let env = Environment::new();
        register_all(&env)?;
        env.put(LOAD_PATH, search_path_value(&config.search_path), true)?;

        if config.load_prelude {
            let result = eval_source(&env, PRELUDE);
            if let Value::Error(message) = result {
                return Err(InitError::Prelude(message));
            }
            tracing::debug!(bindings = env.binding_count(), "prelude loaded");
        }

        Ok(Self { env, config })
    }

    /// The root environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read `text` and evaluate the result in the root environment.
    /// 读取 `text` 并在根环境中求值。
    pub fn eval_str(&self, text: &str) -> Value {
        self.eval(read(text))
    }

    pub fn eval(&self, value: Value) -> Value {
        eval(&self.env, value)
    }

    /// Evaluate every top-level expression of `source` in order.
    pub fn eval_source(&self, source: &str) -> Value {
        eval_source(&self.env, source)
    }

    /// Find `path` on the search path and evaluate it, like `load`.
    /// 在搜索路径上查找 `path` 并求值，与 `load` 相同。
    pub fn run_file(&self, path: impl AsRef<Path>) -> Value {
        let name = path.as_ref().to_string_lossy();
        match read_source(&name, &self.config.search_path) {
            Ok((_, source)) => self.eval_source(&source),
            Err(e) => Value::Error(e.to_string()),
        }
    }
}
