//! Conditions: errors as first-class values.
//!
//! Nothing in the interpreter unwinds. A failure produces a
//! `Value::Condition`, and the evaluator short-circuits any call whose
//! argument evaluates to one. Only `error-handler` turns a condition back
//! into an ordinary value.
//!
//! The constructor functions below are the single place the core creates
//! conditions. [`ConditionKind::Raised`] carries whatever user code raised and
//! [`ConditionKind::NothingParsed`] carries `Nothing`. Every other kind
//! carries a string message.

use crate::heap::Heap;
use crate::value::Value;

/// What kind of failure a condition reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ConditionKind {
    /// Signaled by user code through `raise`.
    #[error("raised")]
    Raised,

    // Reader
    /// Input exhausted before any form was found.
    #[error("nothing parsed")]
    NothingParsed,
    /// Input ended inside a sequence or a string.
    #[error("incomplete input")]
    IncompleteInput,
    /// A `)` with no open sequence.
    #[error("unexpected `)`")]
    UnexpectedClose,

    // Application
    #[error("malformed call")]
    MalformedCall,
    #[error("unbound function")]
    UnboundFunction,
    #[error("not callable")]
    NotCallable,
    #[error("wrong number of arguments")]
    ArityMismatch,
    #[error("malformed special form")]
    MalformedForm,

    // Built-ins
    #[error("type mismatch")]
    TypeMismatch,
    #[error("integer overflow")]
    IntegerOverflow,

    #[error("recursion limit exceeded")]
    RecursionLimit,
}

impl ConditionKind {
    /// Whether the reader produced this condition.
    pub fn is_parse_error(self) -> bool {
        matches!(
            self,
            ConditionKind::NothingParsed
                | ConditionKind::IncompleteInput
                | ConditionKind::UnexpectedClose
        )
    }
}

/// A signaled error carrying an arbitrary payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    kind: ConditionKind,
    payload: Value,
}

impl Condition {
    pub fn new(kind: ConditionKind, payload: Value) -> Self {
        Condition { kind, payload }
    }

    #[inline]
    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    /// The value describing the error (what `error-handler` binds).
    #[inline]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut Value {
        &mut self.payload
    }

    /// Wrap into a `Value`.
    pub fn into_value(self) -> Value {
        Value::Condition(Heap::new(self))
    }
}

fn with_message(kind: ConditionKind, message: String) -> Value {
    Condition::new(kind, Value::string(message)).into_value()
}

/// `raise`: wrap a user value.
pub fn raised(payload: Value) -> Value {
    Condition::new(ConditionKind::Raised, payload).into_value()
}

// Reader conditions

/// Input exhausted with no form found.
#[cold]
pub fn nothing_parsed() -> Value {
    Condition::new(ConditionKind::NothingParsed, Value::Nothing).into_value()
}

/// End of input with `depth` sequences still open.
#[cold]
pub fn unbalanced_parens(depth: usize) -> Value {
    let plural = if depth == 1 { "" } else { "es" };
    with_message(
        ConditionKind::IncompleteInput,
        format!("incomplete lisp code: {depth} unclosed parenthes{plural}"),
    )
}

/// End of input inside a string literal that opened at `offset`.
#[cold]
pub fn unterminated_string(offset: usize) -> Value {
    with_message(
        ConditionKind::IncompleteInput,
        format!("unterminated string starting at byte {offset}"),
    )
}

/// A `)` at `offset` with nothing open.
#[cold]
pub fn unexpected_close(offset: usize) -> Value {
    with_message(
        ConditionKind::UnexpectedClose,
        format!("unexpected `)` at byte {offset}"),
    )
}

// Application conditions

/// `()` in evaluated position.
#[cold]
pub fn malformed_call() -> Value {
    with_message(
        ConditionKind::MalformedCall,
        "cannot evaluate an empty form".to_string(),
    )
}

/// Head symbol has no binding.
#[cold]
pub fn unbound_function(name: &str) -> Value {
    with_message(
        ConditionKind::UnboundFunction,
        format!("unbound function: {name}"),
    )
}

/// Head is not a symbol, or its value is not callable.
#[cold]
pub fn not_callable(what: &str, type_name: &str) -> Value {
    with_message(
        ConditionKind::NotCallable,
        format!("{what} is a {type_name}, not a function"),
    )
}

/// Fixed-shape callable given the wrong number of operands.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> Value {
    let arg_word = if expected == 1 {
        "argument"
    } else {
        "arguments"
    };
    with_message(
        ConditionKind::ArityMismatch,
        format!("{name} expects {expected} {arg_word}, got {got}"),
    )
}

/// Special form with invalid syntax.
#[cold]
pub fn malformed_form(form: &str, reason: &str) -> Value {
    with_message(ConditionKind::MalformedForm, format!("{form}: {reason}"))
}

// Built-in conditions

/// Operator applied to operands it does not accept.
#[cold]
pub fn type_mismatch(op: &str, left: &str, right: &str) -> Value {
    with_message(
        ConditionKind::TypeMismatch,
        format!("cannot apply `{op}` to {left} and {right}"),
    )
}

/// Checked integer arithmetic overflowed.
#[cold]
pub fn integer_overflow(op: &str) -> Value {
    with_message(
        ConditionKind::IntegerOverflow,
        format!("integer overflow in `{op}`"),
    )
}

/// Evaluation nested deeper than the configured limit.
#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> Value {
    with_message(
        ConditionKind::RecursionLimit,
        format!("maximum evaluation depth exceeded (limit: {limit})"),
    )
}
