//! Integration tests for lilith-std crate.

use lilith_eval::Value;
use lilith_reader::read;
use lilith_std::{Config, Interpreter, builtins};

fn interpreter() -> Interpreter {
    Interpreter::new(Config::default()).unwrap()
}

/// Evaluate one expression in a fresh interpreter.
fn eval(source: &str) -> Value {
    interpreter().eval_str(source)
}

/// Evaluate a sequence of expressions in one interpreter, returning the last result.
fn eval_all(source: &str) -> Value {
    interpreter().eval_source(source)
}

fn assert_error_contains(value: &Value, needle: &str) {
    match value {
        Value::Error(message) => assert!(message.contains(needle), "{message}"),
        other => panic!("expected an error containing {needle:?}, got {other}"),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_builtin_names_are_unique() {
    let mut names: Vec<&str> = builtins().into_iter().map(|(name, _)| name).collect();
    let count = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), count);
}

#[test]
fn test_builtins_are_protected() {
    let interp = interpreter();
    assert_error_contains(&interp.eval_str("(def {+} 5)"), "symbol '+' is a built-in");
    assert_eq!(interp.eval_str("(+ 1 2)"), Value::Long(3));
}

#[test]
fn test_load_path_is_protected() {
    assert_error_contains(&eval("(def {load-path} {})"), "is a built-in");
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_numeric_promotion() {
    assert_eq!(eval("(+ 1 2)"), Value::Long(3));
    assert_eq!(eval("(+ 1 2.0)"), Value::Double(3.0));
    assert!(matches!(eval("(+ 1 2.0)"), Value::Double(_)));
    assert!(matches!(eval("(* 2 3)"), Value::Long(6)));
}

#[test]
fn test_arithmetic_operators() {
    assert_eq!(eval("(- 10 4 1)"), Value::Long(5));
    assert_eq!(eval("(- 5)"), Value::Long(-5));
    assert_eq!(eval("(* 2 3 4)"), Value::Long(24));
    assert_eq!(eval("(/ 7 2)"), Value::Long(3));
    assert_eq!(eval("(/ 7.0 2)"), Value::Double(3.5));
    assert_eq!(eval("(% 7 3)"), Value::Long(1));
    assert_eq!(eval("(^ 2 10)"), Value::Long(1024));
    assert_eq!(eval("(max 1 5 3)"), Value::Long(5));
    assert_eq!(eval("(min 4 2.5 3)"), Value::Double(2.5));
}

#[test]
fn test_divide_by_zero() {
    assert_error_contains(&eval("(/ 1 0)"), "divide by zero");
    assert_error_contains(&eval("(/ 1.0 0.0)"), "divide by zero");
    assert_error_contains(&eval("(% 1 0)"), "divide by zero");
}

#[test]
fn test_integer_overflow() {
    assert_error_contains(&eval("(+ 9223372036854775807 1)"), "integer overflow in '+'");
}

#[test]
fn test_arithmetic_type_mismatch() {
    assert_error_contains(
        &eval(r#"(+ 1 "a")"#),
        "function '+' type mismatch - expected Number, received String",
    );
    assert_error_contains(&eval("(+)"), "expects at least 1 argument");
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("(> 2 1)"), Value::Bool(true));
    assert_eq!(eval("(< 2 1)"), Value::Bool(false));
    assert_eq!(eval("(>= 2 2)"), Value::Bool(true));
    assert_eq!(eval("(<= 2 2.0)"), Value::Bool(true));
    assert_error_contains(&eval("(> 1 2 3)"), "expects 2 arguments, received 3");
}

// ============================================================================
// Definitions and scope
// ============================================================================

#[test]
fn test_def() {
    let interp = interpreter();
    assert_eq!(interp.eval_str("(def {x y} 1 2)"), Value::unit());
    assert_eq!(interp.eval_str("(+ x y)"), Value::Long(3));
}

#[test]
fn test_def_count_mismatch() {
    assert_error_contains(&eval("(def {a b} 1)"), "argument mismatch - 2 symbols, 1 values");
}

#[test]
fn test_def_requires_symbols() {
    assert_error_contains(&eval("(def {1} 1)"), "expected Symbol, received Number");
}

#[test]
fn test_let_scope_ends_with_body() {
    let interp = interpreter();
    assert_eq!(interp.eval_str("(let {x} 5 {+ x 1})"), Value::Long(6));
    assert_error_contains(&interp.eval_str("x"), "unbound symbol 'x'");
}

#[test]
fn test_put_inside_let_stays_local() {
    let interp = interpreter();
    interp.eval_str("(let {y} 1 {put {z} 2})");
    assert_error_contains(&interp.eval_str("z"), "unbound symbol 'z'");
}

#[test]
fn test_def_after_error_is_skipped() {
    let interp = interpreter();
    assert_error_contains(&interp.eval_str(r#"(list (error "boom") (def {z} 1))"#), "boom");
    assert_error_contains(&interp.eval_str("z"), "unbound symbol 'z'");
}

#[test]
fn test_def_inside_let_is_global() {
    let interp = interpreter();
    interp.eval_str("(let {y} 1 {def {w} 3})");
    assert_eq!(interp.eval_str("w"), Value::Long(3));
}

#[test]
fn test_def_inside_function_is_global() {
    let interp = interpreter();
    interp.eval_str("(fun {setter v} {def {stored} v})");
    interp.eval_str("(setter 7)");
    assert_eq!(interp.eval_str("stored"), Value::Long(7));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_lambda_and_currying() {
    let interp = interpreter();
    interp.eval_str("(def {add} (\\ {a b} {+ a b}))");
    assert_eq!(interp.eval_str("(add 1 2)"), Value::Long(3));
    assert!(matches!(interp.eval_str("(add 1)"), Value::Lambda(_)));
    assert_eq!(interp.eval_str("((add 1) 2)"), Value::Long(3));

    interp.eval_str("(def {inc} (add 1))");
    assert_eq!(interp.eval_str("(inc 41)"), Value::Long(42));
}

#[test]
fn test_lambda_formals_must_be_symbols() {
    assert_error_contains(&eval("(\\ {1} {1})"), "expected Symbol");
}

#[test]
fn test_variadic_via_fun() {
    let interp = interpreter();
    interp.eval_str("(fun {g a & rest} {rest})");
    assert_eq!(interp.eval_str("(g 1 2 3)"), read("{2 3}"));
    assert_eq!(interp.eval_str("(g 1)"), Value::QExpr(vec![]));
}

#[test]
fn test_recursion() {
    let interp = interpreter();
    interp.eval_str("(fun {fact n} {if (= n 0) {1} {* n (fact (- n 1))}})");
    assert_eq!(interp.eval_str("(fact 10)"), Value::Long(3628800));
}

// ============================================================================
// Lists and strings
// ============================================================================

#[test]
fn test_list_builtins() {
    assert_eq!(eval("(list 1 2)"), read("{1 2}"));
    assert_eq!(eval("(head {1 2 3})"), read("{1}"));
    assert_eq!(eval("(tail {1 2 3})"), read("{2 3}"));
    assert_eq!(eval("(init {1 2 3})"), read("{1 2}"));
    assert_eq!(eval("(len {1 2 3})"), Value::Long(3));
    assert_eq!(eval("(join {1} {} {2 3})"), read("{1 2 3}"));
    assert_eq!(eval("(cons 1 {2 3})"), read("{1 2 3}"));
    assert_eq!(eval("(cons {1} {2})"), read("{{1} 2}"));
    assert_eq!(eval("(eval {+ 1 2})"), Value::Long(3));
}

#[test]
fn test_empty_list_errors() {
    assert_error_contains(&eval("(head {})"), "empty q-expression passed to 'head'");
    assert_error_contains(&eval("(tail {})"), "empty q-expression passed to 'tail'");
    assert_error_contains(&eval("(init {})"), "empty q-expression passed to 'init'");
}

#[test]
fn test_string_builtins() {
    assert_eq!(eval(r#"(head "abc")"#), Value::string("a"));
    assert_eq!(eval(r#"(tail "abc")"#), Value::string("bc"));
    assert_eq!(eval(r#"(len "abc")"#), Value::Long(3));
    assert_eq!(eval(r#"(join "ab" "cd")"#), Value::string("abcd"));
}

#[test]
fn test_string_length_counts_bytes() {
    assert_eq!(eval(r#"(len "λ")"#), Value::Long(2));
}

#[test]
fn test_join_inconsistent_types() {
    assert_error_contains(&eval(r#"(join {1} "a")"#), "inconsistent argument types");
}

// ============================================================================
// Conditionals and logic
// ============================================================================

#[test]
fn test_if() {
    assert_eq!(eval("(if (> 2 1) {1} {2})"), Value::Long(1));
    assert_eq!(eval("(if #f {1} {2})"), Value::Long(2));
    assert_error_contains(&eval("(if 1 {1} {2})"), "expected Boolean, received Number");
}

#[test]
fn test_if_only_evaluates_chosen_branch() {
    assert_eq!(eval("(if #t {1} {undefined})"), Value::Long(1));
}

#[test]
fn test_equality() {
    assert_eq!(eval("(= 3 3.0)"), Value::Bool(true));
    assert_eq!(eval("(= {1 2} {1 2})"), Value::Bool(true));
    assert_eq!(eval("(= {1 2} {1 3})"), Value::Bool(false));
    assert_eq!(eval(r#"(= "a" "b")"#), Value::Bool(false));
    assert_eq!(eval("(= 1 1 1)"), Value::Bool(true));
    assert_error_contains(&eval(r#"(= 1 "1")"#), "inconsistent argument types");
}

#[test]
fn test_logic() {
    assert_eq!(eval("(and #t #f)"), Value::Bool(false));
    assert_eq!(eval("(and #t #t)"), Value::Bool(true));
    assert_eq!(eval("(or #f #t)"), Value::Bool(true));
    assert_eq!(eval("(not #f)"), Value::Bool(true));
    assert_error_contains(&eval("(and #t 1)"), "expected Boolean");
}

// ============================================================================
// Type predicates
// ============================================================================

#[test]
fn test_type_predicates() {
    assert_eq!(eval(r#"(string? "a")"#), Value::Bool(true));
    assert_eq!(eval("(string? 1)"), Value::Bool(false));
    assert_eq!(eval("(number? 1)"), Value::Bool(true));
    assert_eq!(eval("(number? 1.0)"), Value::Bool(false));
    assert_eq!(eval("(decimal? 1.0)"), Value::Bool(true));
    assert_eq!(eval("(boolean? #t)"), Value::Bool(true));
    assert_eq!(eval("(q-expression? {})"), Value::Bool(true));
    assert_eq!(eval("(s-expression? ())"), Value::Bool(true));
    assert_eq!(eval("(function? +)"), Value::Bool(true));
    assert_eq!(eval("(function? map)"), Value::Bool(true));
    assert_eq!(eval("(function? {})"), Value::Bool(false));
}

// ============================================================================
// Utilities
// ============================================================================

#[test]
fn test_error_builtin() {
    assert_eq!(eval(r#"(error "boom")"#), Value::error("boom"));
}

#[test]
fn test_read_builtin() {
    assert_eq!(eval(r#"(read "(+ 1 2)")"#), read("{(+ 1 2)}"));
    assert_eq!(eval(r#"(eval (read "(+ 1 2)"))"#), Value::Long(3));
    assert_error_contains(&eval(r#"(read "(+ 1")"#), "missing close bracket");
}

#[test]
fn test_try() {
    assert_eq!(eval(r#"(try {error "boom"} {42})"#), Value::Long(42));
    assert_eq!(eval("(try {+ 1 2} {0})"), Value::Long(3));
    assert_eq!(eval("(try {undefined} {- 1})"), Value::Long(-1));
}

#[test]
fn test_print_returns_unit() {
    assert_eq!(eval(r#"(print "printed by" 1 {2})"#), Value::unit());
}

#[test]
fn test_env_lists_bindings() {
    let interp = Interpreter::new(Config::default().without_prelude()).unwrap();
    interp.eval_str("(def {answer} 42)");
    let bindings = interp.eval_str("(env)");
    let pairs = bindings.items().expect("env returns a list").to_vec();
    assert!(pairs.contains(&read(r#"{"answer" 42}"#)));
    assert!(pairs.iter().any(|pair| pair.items().and_then(|p| p.first()) == Some(&Value::string("+"))));
}

// ============================================================================
// Prelude
// ============================================================================

#[test]
fn test_prelude_can_be_disabled() {
    let interp = Interpreter::new(Config::default().without_prelude()).unwrap();
    assert_error_contains(&interp.eval_str("map"), "unbound symbol 'map'");
    assert_eq!(interp.eval_str("(+ 1 1)"), Value::Long(2));
}

#[test]
fn test_prelude_list_access() {
    assert_eq!(eval("nil"), Value::QExpr(vec![]));
    assert_eq!(eval("(first {7 8 9})"), Value::Long(7));
    assert_eq!(eval("(second {7 8 9})"), Value::Long(8));
    assert_eq!(eval("(nth 2 {7 8 9})"), Value::Long(9));
    assert_eq!(eval("(last {7 8 9})"), Value::Long(9));
    assert_eq!(eval("(take 2 {1 2 3})"), read("{1 2}"));
    assert_eq!(eval("(drop 2 {1 2 3})"), read("{3}"));
    assert_eq!(eval("(reverse {1 2 3})"), read("{3 2 1}"));
    assert_eq!(eval("(elem 2 {1 2 3})"), Value::Bool(true));
    assert_eq!(eval("(elem 5 {1 2 3})"), Value::Bool(false));
}

#[test]
fn test_prelude_higher_order() {
    assert_eq!(eval("(map (\\ {x} {* x 2}) {1 2 3})"), read("{2 4 6}"));
    assert_eq!(eval("(filter (\\ {x} {> x 1}) {1 2 3})"), read("{2 3}"));
    assert_eq!(eval("(foldl + 0 {1 2 3})"), Value::Long(6));
    assert_eq!(eval("(sum {1 2 3 4})"), Value::Long(10));
    assert_eq!(eval("(product {1 2 3 4})"), Value::Long(24));
    assert_eq!(eval("(map (\\ {x} {* x 2}) nil)"), Value::QExpr(vec![]));
}

#[test]
fn test_prelude_function_helpers() {
    assert_eq!(eval("(unpack + {1 2 3})"), Value::Long(6));
    assert_eq!(eval("(curry + {5 6})"), Value::Long(11));
    assert_eq!(eval("(pack head 1 2 3)"), read("{1}"));
    assert_eq!(eval("(flip - 1 10)"), Value::Long(9));
    assert_eq!(
        eval("((comp (\\ {x} {* x 2}) (\\ {x} {+ x 1})) 3)"),
        Value::Long(8)
    );
}

#[test]
fn test_prelude_do() {
    let interp = interpreter();
    assert_eq!(interp.eval_str("(do (def {q} 1) (+ q 1))"), Value::Long(2));
    assert_eq!(interp.eval_str("(do)"), Value::QExpr(vec![]));
}

#[test]
fn test_sequence_stops_at_first_error() {
    let interp = interpreter();
    let result = interp.eval_source("(def {a} 1) (error \"stop\") (def {b} 2)");
    assert_eq!(result, Value::error("stop"));
    assert_eq!(interp.eval_str("a"), Value::Long(1));
    assert!(interp.eval_str("b").is_error());
}

#[test]
fn test_eval_all_returns_last_result() {
    assert_eq!(eval_all("(def {x} 4) (* x x)"), Value::Long(16));
    assert_eq!(eval_all(""), Value::unit());
}
