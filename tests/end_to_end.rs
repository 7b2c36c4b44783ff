//! End-to-end tests: files, search path and diagnostics.

use std::fs;
use std::path::PathBuf;

use lilith_diagnostic::emit_to;
use lilith_eval::Value;
use lilith_reader::parse;
use lilith_std::config::parse_search_path;
use lilith_std::{Config, Interpreter, resolve};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn interpreter_with(dir: &TempDir) -> Interpreter {
    Interpreter::new(Config::default().with_search_dir(dir.path())).unwrap()
}

// ============================================================================
// Loading files
// ============================================================================

#[test]
fn test_load_from_search_path() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "lib.llth",
        "; helpers\n(def {answer} 42)\n(fun {double x} {* x 2})\n",
    );

    let interp = interpreter_with(&dir);
    assert_eq!(interp.eval_str(r#"(load "lib.llth")"#), Value::unit());
    assert_eq!(interp.eval_str("(double answer)"), Value::Long(84));
}

#[test]
fn test_load_returns_last_result() {
    let dir = TempDir::new().unwrap();
    write(&dir, "value.llth", "(def {x} 2)\n(+ x 40)");

    let interp = interpreter_with(&dir);
    assert_eq!(interp.eval_str(r#"(load "value.llth")"#), Value::Long(42));
}

#[test]
fn test_load_missing_file() {
    let interp = Interpreter::new(Config::default()).unwrap();
    assert_eq!(
        interp.eval_str(r#"(load "no-such-file.llth")"#),
        Value::error("File not found no-such-file.llth")
    );
}

#[test]
fn test_load_stops_at_first_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "broken.llth", "(def {a} 1)\n(error \"stop\")\n(def {b} 2)\n");

    let interp = interpreter_with(&dir);
    assert_eq!(interp.eval_str(r#"(load "broken.llth")"#), Value::error("stop"));
    assert_eq!(interp.eval_str("a"), Value::Long(1));
    assert!(interp.eval_str("b").is_error());
}

#[test]
fn test_load_reports_read_errors() {
    let dir = TempDir::new().unwrap();
    write(&dir, "unbalanced.llth", "(def {a} 1)\n(+ 1");

    let interp = interpreter_with(&dir);
    let result = interp.eval_str(r#"(load "unbalanced.llth")"#);
    assert_eq!(result, Value::error("at 2:5 - missing close bracket"));
    // nothing runs when the file cannot be read
    assert!(interp.eval_str("a").is_error());
}

#[test]
fn test_nested_load() {
    let dir = TempDir::new().unwrap();
    write(&dir, "inner.llth", "(def {inner} 1)");
    write(&dir, "outer.llth", "(load \"inner.llth\")\n(def {outer} (+ inner 1))");

    let interp = interpreter_with(&dir);
    interp.eval_str(r#"(load "outer.llth")"#);
    assert_eq!(interp.eval_str("outer"), Value::Long(2));
}

#[test]
fn test_run_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "main.llth", "(sum (map (\\ {x} {* x x}) {1 2 3}))");

    let interp = Interpreter::new(Config::default()).unwrap();
    assert_eq!(interp.run_file(&path), Value::Long(14));
}

#[test]
fn test_file_to_string() {
    let dir = TempDir::new().unwrap();
    write(&dir, "data.txt", "line one\nline two\n");

    let interp = interpreter_with(&dir);
    assert_eq!(
        interp.eval_str(r#"(file->string "data.txt")"#),
        Value::string("line one\nline two\n")
    );
    assert_eq!(interp.eval_str(r#"(len (file->string "data.txt"))"#), Value::Long(18));
}

// ============================================================================
// Search path
// ============================================================================

#[test]
fn test_resolve_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write(&second, "only-second.llth", "");
    let both_in_first = write(&first, "both.llth", "");
    write(&second, "both.llth", "");

    let search = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    assert_eq!(resolve("both.llth", &search), Some(both_in_first));
    assert_eq!(
        resolve("only-second.llth", &search),
        Some(second.path().join("only-second.llth"))
    );
    assert_eq!(resolve("missing.llth", &search), None);
}

#[test]
fn test_resolve_direct_path_first() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "direct.llth", "");
    let name = path.to_string_lossy();
    assert_eq!(resolve(&name, &[]), Some(path.clone()));
}

#[test]
fn test_search_path_is_visible_to_programs() {
    let dir = TempDir::new().unwrap();
    let interp = interpreter_with(&dir);
    let expected = Value::QExpr(vec![Value::string(dir.path().to_string_lossy())]);
    assert_eq!(interp.eval_str("load-path"), expected);
}

#[cfg(unix)]
#[test]
fn test_parse_search_path() {
    let dirs = parse_search_path("/usr/share/lilith:/opt/lilith".as_ref());
    assert_eq!(
        dirs,
        vec![PathBuf::from("/usr/share/lilith"), PathBuf::from("/opt/lilith")]
    );
}

// ============================================================================
// Diagnostics
// ============================================================================

fn render(source: &str) -> String {
    let err = parse(source).unwrap_err();
    let mut out = Vec::new();
    emit_to(&mut out, source, "test.llth", &err.to_diagnostic(), false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_render_missing_close() {
    let output = render("(def {x}\n  (+ 1 2)");
    assert!(output.contains("E0101"), "{output}");
    assert!(output.contains("missing close bracket"), "{output}");
    assert!(output.contains("test.llth"), "{output}");
    assert!(output.contains("reader stopped at"), "{output}");
}

#[test]
fn test_render_unterminated_string() {
    let output = render("(print \"never closed");
    assert!(output.contains("E0002"), "{output}");
    assert!(output.contains("unterminated string"), "{output}");
    assert!(output.contains("tokenizer stopped at"), "{output}");
}

#[test]
fn test_render_unexpected_close() {
    let output = render("{1 2)");
    assert!(output.contains("E0100"), "{output}");
    assert!(output.contains("unexpected ')'"), "{output}");
}
