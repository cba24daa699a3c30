#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use lisp_eval::buffer_handler;
use pretty_assertions::assert_eq;
use std::io::Write;

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

#[test]
fn runs_every_form() {
    let mut interp = interpreter();
    let outcome = run_source(&mut interp, "(set x 1) (set x (+ x 1)) x");
    assert_eq!(outcome.forms, 3);
    assert_eq!(outcome.last, Value::int(2));
    assert!(outcome.is_success());
}

#[test]
fn empty_source_runs_nothing() {
    let mut interp = interpreter();
    let outcome = run_source(&mut interp, "  ; nothing here\n");
    assert_eq!(outcome.forms, 0);
    assert_eq!(outcome.last, Value::Nothing);
    assert!(outcome.is_success());
}

#[test]
fn conditions_are_recorded_and_run_continues() {
    let mut interp = interpreter();
    let outcome = run_source(&mut interp, "(raise 1) (println \"still here\") (nope)");

    assert_eq!(outcome.forms, 3);
    assert_eq!(
        outcome
            .conditions
            .iter()
            .map(|c| c.condition_kind())
            .collect::<Vec<_>>(),
        vec![
            Some(ConditionKind::Raised),
            Some(ConditionKind::UnboundFunction)
        ]
    );
    assert!(!outcome.is_success());
    assert_eq!(interp.print_handler().output(), "still here\n");
}

#[test]
fn parse_error_stops_run() {
    let mut interp = interpreter();
    let outcome = run_source(&mut interp, "(set a 1) (set b 2");

    assert_eq!(outcome.forms, 1);
    assert_eq!(
        outcome.parse_error.as_ref().and_then(Value::condition_kind),
        Some(ConditionKind::IncompleteInput)
    );
    assert_eq!(interp.global("a"), Value::int(1));
    assert_eq!(interp.global("b"), Value::Nothing);
}

#[test]
fn stray_close_is_parse_error() {
    let mut interp = interpreter();
    let outcome = run_source(&mut interp, "1 )");
    assert_eq!(outcome.forms, 1);
    assert_eq!(
        outcome.parse_error.as_ref().and_then(Value::condition_kind),
        Some(ConditionKind::UnexpectedClose)
    );
}

#[test]
fn globals_persist_across_sources() {
    let mut interp = interpreter();
    run_source(&mut interp, "(set greeting \"hi\")");
    let outcome = run_source(&mut interp, "greeting");
    assert_eq!(outcome.last, Value::string("hi"));
}

#[test]
fn read_source_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "(+ 1 2)").unwrap();
    assert_eq!(read_source(file.path()).unwrap(), "(+ 1 2)");
}

#[test]
fn read_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.lisp");
    let err = read_source(&path).unwrap_err();
    assert!(matches!(err, DriverError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        format!("cannot find file '{}'", path.display())
    );
}

#[test]
fn read_source_rejects_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[b'(', 0xFF, 0xFE, b')']).unwrap();
    let err = read_source(file.path()).unwrap_err();
    assert!(matches!(err, DriverError::InvalidUtf8 { .. }));
}

#[test]
fn deep_source_hits_recursion_limit_without_crashing() {
    const DEPTH: usize = 20_000;
    let source = format!("{}0{}", "(+ 1 ".repeat(DEPTH), ")".repeat(DEPTH));

    let mut interp = interpreter();
    let outcome = run_source(&mut interp, &source);

    assert_eq!(outcome.forms, 1);
    assert!(outcome.parse_error.is_none());
    assert_eq!(
        outcome
            .conditions
            .iter()
            .map(Value::condition_kind)
            .collect::<Vec<_>>(),
        vec![Some(ConditionKind::RecursionLimit)]
    );

    let outcome = run_source(&mut interp, "(+ 1 2)");
    assert_eq!(outcome.last, Value::int(3));
}
