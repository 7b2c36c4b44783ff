//! Locating source files on the search path.
//! 在搜索路径上定位源文件。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lilith_eval::{Environment, Value};
use thiserror::Error;

/// Name of the protected binding holding the search path as a Q-expression
/// of strings.
pub const LOAD_PATH: &str = "load-path";

/// Errors from finding or reading a source file.
/// 查找或读取源文件时的错误。
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found {0}")]
    NotFound(String),
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve `name` as given (relative to the working directory), then against
/// each directory of `search_path` in order.
/// 先按原样解析 `name`，再依次在 `search_path` 的各目录中查找。
pub fn resolve(name: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    search_path
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Resolve and read `name`.
pub fn read_source(name: &str, search_path: &[PathBuf]) -> Result<(PathBuf, String), LoadError> {
    let path = resolve(name, search_path).ok_or_else(|| LoadError::NotFound(name.to_string()))?;
    let source = fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(name, path = %path.display(), bytes = source.len(), "read source file");
    Ok((path, source))
}

/// Search path stored in `env` under [`LOAD_PATH`]; empty when unset.
pub fn search_path(env: &Environment) -> Vec<PathBuf> {
    match env.lookup(LOAD_PATH) {
        Some(Value::QExpr(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(dir) => Some(PathBuf::from(dir)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The search path as a Lilith value.
pub fn search_path_value(dirs: &[PathBuf]) -> Value {
    Value::QExpr(
        dirs.iter()
            .map(|dir| Value::String(dir.to_string_lossy().into_owned()))
            .collect(),
    )
}
