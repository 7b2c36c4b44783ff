//! CLI command implementations.

pub mod eval;
pub mod repl;
pub mod run;

use std::path::PathBuf;

use lilith_std::{Config, Interpreter};

/// Flags shared by every command.
pub struct Options {
    pub include: Vec<PathBuf>,
    pub no_prelude: bool,
    /// Drop the REPL banner and the `eval` result; diagnostics still print.
    pub quiet: bool,
}

impl Options {
    /// `LILITH_PATH` plus `-I` directories, the first `-I` searched first.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        for dir in self.include.iter().rev() {
            config = config.with_search_dir(dir);
        }
        if self.no_prelude {
            config = config.without_prelude();
        }
        config
    }
}

/// Build an interpreter for `options`.
pub fn interpreter(options: &Options) -> Result<Interpreter, String> {
    let config = options.config();
    tracing::debug!(search_path = ?config.search_path, prelude = config.load_prelude, "creating interpreter");
    Interpreter::new(config).map_err(|e| e.to_string())
}
