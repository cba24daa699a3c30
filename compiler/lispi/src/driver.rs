//! Running source text against an interpreter.

use std::io;
use std::path::{Path, PathBuf};

use lisp_eval::{ConditionKind, Interpreter, Value};

/// Host-level failures. Everything inside the language is a condition value.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot find file '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("'{}' contains invalid UTF-8 data", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("error reading '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DriverError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => DriverError::InvalidUtf8 {
            path: path.to_path_buf(),
        },
        _ => DriverError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// What happened while running one source text.
#[derive(Debug)]
pub struct RunOutcome {
    /// Top-level forms evaluated.
    pub forms: usize,
    /// Result of the last evaluated form (`Nothing` if none ran).
    pub last: Value,
    /// Conditions that reached top level, in order.
    pub conditions: Vec<Value>,
    /// Reader condition that stopped the run, if any.
    pub parse_error: Option<Value>,
}

impl RunOutcome {
    /// No unhandled condition and no reader error.
    pub fn is_success(&self) -> bool {
        self.conditions.is_empty() && self.parse_error.is_none()
    }
}

/// Read and evaluate every top-level form of `source` in order.
///
/// A condition from one form is recorded and the run moves on to the next
/// form. A reader error stops the run, since nothing after it can be located
/// reliably.
pub fn run_source(interp: &mut Interpreter, source: &str) -> RunOutcome {
    let mut outcome = RunOutcome {
        forms: 0,
        last: Value::Nothing,
        conditions: Vec::new(),
        parse_error: None,
    };

    let mut input = source;
    loop {
        let form = lisp_parse::parse(&mut input, interp.symbols());
        match form.condition_kind() {
            Some(ConditionKind::NothingParsed) => break,
            Some(kind) if kind.is_parse_error() => {
                outcome.parse_error = Some(form);
                break;
            }
            _ => {}
        }

        let result = interp.eval_top_level(&form);
        outcome.forms += 1;
        if result.is_condition() {
            outcome.conditions.push(result.clone());
        }
        outcome.last = result;
    }

    tracing::debug!(
        forms = outcome.forms,
        conditions = outcome.conditions.len(),
        parse_error = outcome.parse_error.is_some(),
        "source finished"
    );
    outcome
}

#[cfg(test)]
mod tests;
