//! The `lilith repl` command.

use lilith_reader::parse;
use lilith_std::Interpreter;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::{Options, interpreter};
use crate::output;

pub fn run(options: &Options) -> Result<(), String> {
    let interp = interpreter(options)?;
    session(&interp, options.quiet)
}

/// Read-eval-print loop over an existing interpreter. `quiet` drops the
/// banner and farewell.
pub fn session(interp: &Interpreter, quiet: bool) -> Result<(), String> {
    if !quiet {
        println!("Lilith Lisp v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit");
        println!();
    }

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;

    loop {
        let readline = rl.readline("lilith> ");
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if let Err(e) = rl.add_history_entry(line) {
                    tracing::warn!(error = %e, "cannot record history");
                }

                if line == "exit" {
                    break;
                }

                if line.starts_with(':') {
                    match line {
                        ":quit" | ":q" => break,
                        ":help" | ":h" => {
                            println!("Commands:");
                            println!("  :help, :h    Show this help");
                            println!("  :quit, :q    Exit the REPL (also: exit, Ctrl-D)");
                            println!("  :env         Show user bindings");
                        }
                        ":env" => show_env(interp),
                        _ => println!("Unknown command: {}", line),
                    }
                    continue;
                }

                match parse(line) {
                    Ok(value) => output::value(&interp.eval(value)),
                    Err(e) => output::diagnostic(line, "<repl>", &e.to_diagnostic()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if !quiet {
        println!("Goodbye!");
    }
    Ok(())
}

fn show_env(interp: &Interpreter) {
    let env = interp.env();
    for (name, value) in env.bindings() {
        if !env.is_builtin(&name) {
            println!("  {name} = {value}");
        }
    }
}
