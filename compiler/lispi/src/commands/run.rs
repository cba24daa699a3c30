//! The `run` command: evaluate files in order against one interpreter.

use std::path::Path;

use lisp_eval::Interpreter;

use super::describe_condition;
use crate::driver::{read_source, run_source};

/// Run each file in `paths`. Globals set by one file are visible to the next.
///
/// With `print_results`, the value of each file's last form is printed.
pub fn run_files(paths: &[String], print_results: bool) -> bool {
    let mut interp = Interpreter::new();
    let mut ok = true;

    for path in paths {
        tracing::debug!(path = %path, "running file");
        let source = match read_source(Path::new(path)) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("error: {e}");
                ok = false;
                continue;
            }
        };

        let outcome = run_source(&mut interp, &source);
        let symbols = interp.symbols();

        for cond in &outcome.conditions {
            eprintln!(
                "{path}: unhandled condition: {}",
                describe_condition(cond, symbols)
            );
        }
        if let Some(err) = &outcome.parse_error {
            eprintln!("{path}: {}", describe_condition(err, symbols));
        }
        if print_results && !outcome.last.is_condition() {
            println!("{}", outcome.last.repr(symbols));
        }

        ok &= outcome.is_success();
    }

    ok
}
