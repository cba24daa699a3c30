//! End-to-end behavior: source text through the reader and the evaluator.

use lisp_eval::{buffer_handler, ConditionKind, Interpreter, Value};
use pretty_assertions::assert_eq;

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

fn run(interp: &mut Interpreter, source: &str) -> Value {
    let mut input = source;
    let mut last = Value::Nothing;
    loop {
        let form = lisp_parse::parse(&mut input, interp.symbols());
        match form.condition_kind() {
            Some(ConditionKind::NothingParsed) => return last,
            Some(kind) if kind.is_parse_error() => panic!("parse failed: {form:?}"),
            _ => last = interp.eval_top_level(&form),
        }
    }
}

#[test]
fn arithmetic() {
    let mut interp = interpreter();
    assert_eq!(run(&mut interp, "(+ 1 (+ 3 2))"), Value::int(6));
    assert_eq!(run(&mut interp, "(+ 1 10)"), Value::int(11));
}

fn count_down_global(start: i64) {
    let mut interp = interpreter();
    run(&mut interp, &format!("(set counter {start})"));
    run(
        &mut interp,
        "(loop (> counter 0) (set counter (+ counter -1)))",
    );
    assert_eq!(interp.global("counter"), Value::int(0));
}

#[test]
fn global_counter_loop_runs_to_zero() {
    count_down_global(200_000);
}

#[test]
#[ignore = "25 million iterations; run with --ignored in release builds"]
fn global_counter_loop_runs_25_million_times() {
    count_down_global(25_000_000);
}

#[test]
fn let_bound_counter_loop_runs_to_zero() {
    let mut interp = interpreter();
    let result = run(
        &mut interp,
        "(let ((b 1000000))
           (loop (> b 0)
             (set b (+ b -1)))
           b)",
    );
    assert_eq!(result, Value::int(0));
    assert_eq!(interp.global("b"), Value::Nothing);
}

#[test]
fn let_does_not_touch_outer_binding() {
    let mut interp = interpreter();
    run(&mut interp, "(set x \"outer\")");
    assert_eq!(run(&mut interp, "(let ((x 5)) x)"), Value::int(5));
    assert_eq!(interp.global("x"), Value::string("outer"));
}

#[test]
fn raise_short_circuits_and_handler_recovers() {
    let mut interp = interpreter();
    let raised = run(&mut interp, "(+ 1 (raise \"boom\"))");
    assert_eq!(raised.condition_kind(), Some(ConditionKind::Raised));
    assert_eq!(
        raised.as_condition().map(|c| c.payload().clone()),
        Some(Value::string("boom"))
    );

    let recovered = run(&mut interp, "(error-handler (+ 1 (raise \"boom\")) ((e) e))");
    assert_eq!(recovered, Value::string("boom"));
}

#[test]
fn program_with_output() {
    let mut interp = interpreter();
    run(
        &mut interp,
        r#"
        ; count down, printing each step
        (set n 3)
        (loop (> n 0)
          (println "n = " n)
          (set n (+ n -1)))
        (println "done")
        "#,
    );
    assert_eq!(
        interp.print_handler().output(),
        "n = 3\nn = 2\nn = 1\ndone\n"
    );
}

#[test]
fn conditions_do_not_stop_later_forms() {
    let mut interp = interpreter();
    let forms = "(set a 1) (missing) (set b 2)";
    run(&mut interp, forms);
    assert_eq!(interp.global("a"), Value::int(1));
    assert_eq!(interp.global("b"), Value::int(2));
}

#[test]
fn quoted_code_round_trips_through_eval() {
    let mut interp = interpreter();
    run(&mut interp, "(set prog (quote (let ((x 20)) (+ x 22))))");
    assert_eq!(run(&mut interp, "(eval prog)"), Value::int(42));
}
