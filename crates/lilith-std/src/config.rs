//! Interpreter configuration.
//! 解释器配置。

use std::ffi::OsStr;
use std::path::PathBuf;

/// Environment variable holding extra directories to search for `load`.
pub const PATH_VAR: &str = "LILITH_PATH";

/// Settings for an [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directories searched, in order, after the working directory.
    /// 在工作目录之后依次搜索的目录。
    pub search_path: Vec<PathBuf>,
    /// Evaluate the bundled prelude on startup.
    pub load_prelude: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_path: Vec::new(),
            load_prelude: true,
        }
    }
}

impl Config {
    /// Default configuration with the search path taken from `LILITH_PATH`.
    /// 默认配置，搜索路径取自 `LILITH_PATH`。
    pub fn from_env() -> Self {
        let search_path = std::env::var_os(PATH_VAR)
            .map(|value| parse_search_path(&value))
            .unwrap_or_default();
        tracing::debug!(dirs = search_path.len(), "search path from {}", PATH_VAR);
        Self {
            search_path,
            ..Self::default()
        }
    }

    /// Put `dir` in front of the existing search path.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_path.insert(0, dir.into());
        self
    }

    pub fn without_prelude(mut self) -> Self {
        self.load_prelude = false;
        self
    }
}

/// Split a platform path list (`:`-separated on Unix), dropping empty entries.
pub fn parse_search_path(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect()
}
