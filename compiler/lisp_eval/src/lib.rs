//! Lisp Eval - tree-walking evaluator for the lisp interpreter.
//!
//! # Architecture
//!
//! - [`GlobalScope`]: symbol-id indexed global bindings
//! - [`LexicalScope`]: stack-allocated frames for `let` and handler clauses
//! - [`Interpreter`]: evaluation entry point, special forms, depth guard
//! - built-ins (`+`, `>`, `println`, `raise`) registered at construction
//! - [`PrintHandlerImpl`]: where `println` output goes
//!
//! Value types live in `lisp_ir` and are re-exported here.

mod builtins;
mod environment;
pub mod interpreter;
mod print_handler;

pub use lisp_ir::{Callable, Condition, ConditionKind, SharedSymbolTable, Symbol, Value};

pub use environment::{GlobalScope, LexicalScope};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_DEPTH};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
