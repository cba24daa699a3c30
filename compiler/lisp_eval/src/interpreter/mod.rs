//! The tree-walking evaluator.
//!
//! `evaluate` is the whole interpreter: symbols resolve through the scope
//! chain, sequences are calls, everything else evaluates to itself. A call
//! resolves its head symbol to a [`Callable`] and dispatches on the
//! callable's shape.
//!
//! Errors are values. Internally the evaluator threads them as the `Err` side
//! of [`EvalResult`] so `?` gives the short-circuit: the first operand that
//! evaluates to a condition becomes the result of the whole form and the
//! callee is never invoked.

mod builder;
mod special_forms;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_DEPTH};

use lisp_ir::{condition, Callable, SharedSymbolTable, Symbol, Value};

use lisp_stack::ensure_sufficient_stack;

use crate::environment::{GlobalScope, LexicalScope};
use crate::print_handler::SharedPrintHandler;

/// `Ok` for ordinary values, `Err` for a condition being propagated.
pub(crate) type EvalResult = Result<Value, Value>;

/// Split a value into the propagation channel.
#[inline]
pub(crate) fn signal(value: Value) -> EvalResult {
    if value.is_condition() {
        Err(value)
    } else {
        Ok(value)
    }
}

/// An interpreter instance: global bindings plus evaluation state.
///
/// Each instance owns its own global scope, so independent instances never
/// observe each other's `set`s.
pub struct Interpreter {
    globals: GlobalScope,
    print_handler: SharedPrintHandler,
    /// Maximum nesting of compound forms, `None` for unbounded.
    max_depth: Option<usize>,
    depth: usize,
}

impl Interpreter {
    /// Interpreter with default configuration (stdout output).
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn symbols(&self) -> &SharedSymbolTable {
        self.globals.symbols()
    }

    pub fn globals(&self) -> &GlobalScope {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut GlobalScope {
        &mut self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn intern(&self, name: &str) -> Symbol {
        self.symbols().intern(name)
    }

    /// Bind a global by name (host-provided values and functions).
    pub fn define(&mut self, name: &str, value: Value) {
        self.globals.define_builtin(name, value);
    }

    /// Current global value of `name`, `Nothing` if unbound.
    pub fn global(&self, name: &str) -> Value {
        self.symbols()
            .get(name)
            .map_or(Value::Nothing, |sym| self.globals.get(sym))
    }

    /// Evaluate a form with no lexical frame.
    pub fn eval_top_level(&mut self, code: &Value) -> Value {
        let result = self.evaluate(None, code);
        if let Some(cond) = result.as_condition() {
            tracing::warn!(kind = %cond.kind(), "unhandled condition at top level");
        }
        result
    }

    /// Evaluate `code` in `scope` (the global scope when `None`).
    pub fn evaluate(&mut self, scope: Option<&LexicalScope<'_>>, code: &Value) -> Value {
        match code {
            Value::Symbol(sym) => self.globals.resolve(scope, *sym),
            Value::Sequence(form) => self.eval_form(scope, form),
            literal => literal.clone(),
        }
    }

    /// Depth-guarded entry for compound forms.
    fn eval_form(&mut self, scope: Option<&LexicalScope<'_>>, form: &[Value]) -> Value {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return condition::recursion_limit_exceeded(limit);
            }
        }

        self.depth = self.depth.saturating_add(1);
        let result = ensure_sufficient_stack(|| self.apply(scope, form));
        self.depth = self.depth.saturating_sub(1);

        result.unwrap_or_else(|cond| cond)
    }

    /// Resolve the head of `form` and dispatch on its shape.
    fn apply(&mut self, scope: Option<&LexicalScope<'_>>, form: &[Value]) -> EvalResult {
        let Some((head, operands)) = form.split_first() else {
            return Err(condition::malformed_call());
        };
        let callable = self.resolve_callable(scope, head)?;

        match (callable, operands) {
            (Callable::Special(special), _) => self.eval_special(special, scope, operands),
            (Callable::Unary { func, .. }, [a]) => {
                let a = self.eval_operand(scope, a)?;
                signal((*func)(a))
            }
            (Callable::Binary { func, .. }, [a, b]) => {
                let a = self.eval_operand(scope, a)?;
                let b = self.eval_operand(scope, b)?;
                signal((*func)(a, b))
            }
            (Callable::Ternary { func, .. }, [a, b, c]) => {
                let a = self.eval_operand(scope, a)?;
                let b = self.eval_operand(scope, b)?;
                let c = self.eval_operand(scope, c)?;
                signal((*func)(a, b, c))
            }
            (Callable::Variadic { func, .. }, args) => {
                let args = self.eval_operands(scope, args)?;
                signal((*func)(&args))
            }
            (Callable::VariadicVoid { func, .. }, args) => {
                let args = self.eval_operands(scope, args)?;
                (*func)(&args);
                Ok(Value::Nothing)
            }
            (fixed, _) => Err(condition::arity_mismatch(
                fixed.name(),
                fixed.arity().unwrap_or_default(),
                operands.len(),
            )),
        }
    }

    /// Head position must be a symbol bound to a callable.
    fn resolve_callable(
        &self,
        scope: Option<&LexicalScope<'_>>,
        head: &Value,
    ) -> Result<Callable, Value> {
        let Value::Symbol(sym) = head else {
            return Err(condition::not_callable("head of form", head.type_name()));
        };
        match &self.globals.resolve(scope, *sym) {
            Value::Callable(callable) => Ok(callable.clone()),
            Value::Nothing => Err(condition::unbound_function(self.symbols().lookup(*sym))),
            other => Err(condition::not_callable(
                self.symbols().lookup(*sym),
                other.type_name(),
            )),
        }
    }

    #[inline]
    fn eval_operand(&mut self, scope: Option<&LexicalScope<'_>>, form: &Value) -> EvalResult {
        signal(self.evaluate(scope, form))
    }

    /// Evaluate operands left to right, stopping at the first condition.
    fn eval_operands(
        &mut self,
        scope: Option<&LexicalScope<'_>>,
        forms: &[Value],
    ) -> Result<Vec<Value>, Value> {
        forms
            .iter()
            .map(|form| self.eval_operand(scope, form))
            .collect()
    }

    /// Evaluate `body` in order, yielding the last value (`Nothing` if empty).
    fn eval_body(&mut self, scope: Option<&LexicalScope<'_>>, body: &[Value]) -> EvalResult {
        let mut last = Value::Nothing;
        for form in body {
            last = self.eval_operand(scope, form)?;
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("globals", &self.globals)
            .field("max_depth", &self.max_depth)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
