//! Command handlers for the `lisp` CLI.
//!
//! Each handler prints its own output and diagnostics and returns whether
//! it succeeded; `main` turns failure into exit status 1.

mod eval;
mod parse;
mod run;

pub use eval::eval_expression;
pub use parse::parse_file;
pub use run::run_files;

use lisp_ir::{SymbolTable, Value};

/// One-line description of a condition for stderr.
pub(crate) fn describe_condition(value: &Value, symbols: &SymbolTable) -> String {
    match value.as_condition() {
        Some(cond) if cond.payload().is_nothing() => cond.kind().to_string(),
        Some(cond) => format!("{}: {}", cond.kind(), cond.payload().display(symbols)),
        None => value.display(symbols).to_string(),
    }
}
