//! `InterpreterBuilder` for configuring an [`Interpreter`].

use lisp_ir::SharedSymbolTable;

use super::Interpreter;
use crate::builtins;
use crate::environment::GlobalScope;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default nesting limit for compound forms.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Builder for [`Interpreter`] instances.
///
/// Defaults: a fresh symbol table, stdout output, [`DEFAULT_MAX_DEPTH`].
pub struct InterpreterBuilder {
    symbols: Option<SharedSymbolTable>,
    print_handler: Option<SharedPrintHandler>,
    max_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            symbols: None,
            print_handler: None,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Share an existing symbol table (e.g. one a parser already filled).
    #[must_use]
    pub fn symbols(mut self, symbols: SharedSymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Where `println` writes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit on nested compound forms before evaluation yields a
    /// recursion-limit condition.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Disable the nesting limit. Native stack growth still applies.
    #[must_use]
    pub fn unlimited_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Build the interpreter and register the built-ins.
    pub fn build(self) -> Interpreter {
        let symbols = self.symbols.unwrap_or_default();
        let print_handler = self.print_handler.unwrap_or_else(stdout_handler);

        let mut globals = GlobalScope::new(symbols);
        builtins::register(&mut globals, print_handler.clone());
        tracing::debug!(
            symbols = globals.symbols().len(),
            max_depth = ?self.max_depth,
            "interpreter initialized"
        );

        Interpreter {
            globals,
            print_handler,
            max_depth: self.max_depth,
            depth: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
