//! The `lilith run` command.

use std::path::{Path, PathBuf};

use lilith_eval::Value;
use lilith_reader::read_all;
use lilith_std::Interpreter;
use lilith_std::path::read_source;

use super::{Options, interpreter, repl};
use crate::output;

pub fn run(files: &[PathBuf], interactive: bool, options: &Options) -> Result<(), String> {
    let interp = interpreter(options)?;

    for file in files {
        run_file(&interp, file)?;
    }

    if interactive {
        repl::session(&interp, options.quiet)?;
    }
    Ok(())
}

/// Load one file. Read errors are rendered against the source before failing.
fn run_file(interp: &Interpreter, file: &Path) -> Result<(), String> {
    let name = file.to_string_lossy();
    let (path, source) =
        read_source(&name, &interp.config().search_path).map_err(|e| e.to_string())?;
    let filename = path.display().to_string();

    let expressions = match read_all(&source) {
        Ok(expressions) => expressions,
        Err(e) => {
            output::diagnostic(&source, &filename, &e.to_diagnostic());
            return Err(format!("cannot read '{filename}'"));
        }
    };

    for expression in expressions {
        if let Value::Error(message) = interp.eval(expression) {
            return Err(format!("{filename}: {message}"));
        }
    }
    Ok(())
}
