//! The `eval` command: evaluate an expression given on the command line.

use lisp_eval::Interpreter;

use super::describe_condition;
use crate::driver::run_source;

/// Evaluate `expr` and print the value of its last form.
pub fn eval_expression(expr: &str) -> bool {
    let mut interp = Interpreter::new();
    let outcome = run_source(&mut interp, expr);
    let symbols = interp.symbols();

    if let Some(err) = &outcome.parse_error {
        eprintln!("error: {}", describe_condition(err, symbols));
        return false;
    }
    match outcome.conditions.last() {
        Some(cond) => {
            eprintln!("unhandled condition: {}", describe_condition(cond, symbols));
            false
        }
        None => {
            println!("{}", outcome.last.repr(symbols));
            true
        }
    }
}
