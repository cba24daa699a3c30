//! Lisp IR - the value model shared by the reader and the evaluator.
//!
//! Code and data are the same thing in this interpreter: the parser produces
//! nested `Value::Sequence`s and the evaluator walks them directly. There is
//! no separate AST.
//!
//! # Contents
//!
//! - [`Symbol`] / [`SymbolTable`]: dense interned identifiers
//! - [`Value`]: the tagged union every form and result is made of
//! - [`Callable`]: the fixed call shapes the evaluator dispatches on
//! - [`Condition`]: errors carried as ordinary values

mod callable;
pub mod condition;
mod heap;
mod symbol;
mod value;

pub use callable::{
    BinaryFn, Callable, SpecialForm, TernaryFn, UnaryFn, VariadicFn, VariadicVoidFn,
};
pub use condition::{Condition, ConditionKind};
pub use heap::Heap;
pub use symbol::{InternError, SharedSymbolTable, Symbol, SymbolTable};
pub use value::{Value, ValueDisplay};
