//! Handlers for forms that receive their operands unevaluated.
//!
//! `operands` is everything after the head symbol, exactly as read.

use lisp_ir::{condition, SpecialForm, Symbol, Value};
use smallvec::SmallVec;

use super::{signal, EvalResult, Interpreter};
use crate::environment::LexicalScope;

impl Interpreter {
    pub(super) fn eval_special(
        &mut self,
        form: SpecialForm,
        scope: Option<&LexicalScope<'_>>,
        operands: &[Value],
    ) -> EvalResult {
        tracing::trace!(form = form.name(), operands = operands.len(), "special form");
        match form {
            SpecialForm::Quote => Ok(operands.first().cloned().unwrap_or(Value::Nothing)),
            SpecialForm::Set => self.eval_set(scope, operands),
            SpecialForm::Let => self.eval_let(scope, operands),
            SpecialForm::Loop => self.eval_loop(scope, operands),
            SpecialForm::ErrorHandler => self.eval_error_handler(scope, operands),
            SpecialForm::Eval => self.eval_eval(scope, operands),
        }
    }

    /// `(set name value)`
    fn eval_set(&mut self, scope: Option<&LexicalScope<'_>>, operands: &[Value]) -> EvalResult {
        let [target, value] = operands else {
            return Err(condition::malformed_form(
                "set",
                "expected a symbol and a value",
            ));
        };
        let Some(sym) = target.as_symbol() else {
            return Err(condition::malformed_form(
                "set",
                &format!("cannot assign to a {}", target.type_name()),
            ));
        };

        let value = self.eval_operand(scope, value)?;
        self.globals.assign(scope, sym, value);
        Ok(Value::Nothing)
    }

    /// `(let ((name init) ...) body...)`
    ///
    /// Initializers run in the enclosing scope, left to right, before the new
    /// frame exists. A bare `name` in the binding list binds `Nothing`.
    fn eval_let(&mut self, scope: Option<&LexicalScope<'_>>, operands: &[Value]) -> EvalResult {
        let Some((bindings, body)) = operands.split_first() else {
            return Err(condition::malformed_form("let", "missing binding list"));
        };
        let Some(bindings) = bindings.as_sequence() else {
            return Err(condition::malformed_form(
                "let",
                &format!("binding list must be a sequence, not a {}", bindings.type_name()),
            ));
        };

        let mut values: SmallVec<[(Symbol, Value); 4]> = SmallVec::with_capacity(bindings.len());
        for binding in bindings {
            let (sym, init) = match binding {
                Value::Symbol(sym) => (*sym, None),
                Value::Sequence(pair) => match &pair[..] {
                    [Value::Symbol(sym)] => (*sym, None),
                    [Value::Symbol(sym), init] => (*sym, Some(init)),
                    _ => {
                        return Err(condition::malformed_form(
                            "let",
                            "each binding must be (name value)",
                        ))
                    }
                },
                other => {
                    return Err(condition::malformed_form(
                        "let",
                        &format!("binding name must be a symbol, not a {}", other.type_name()),
                    ))
                }
            };
            let value = match init {
                Some(init) => self.eval_operand(scope, init)?,
                None => Value::Nothing,
            };
            values.push((sym, value));
        }

        let frame = LexicalScope::new(scope);
        for (sym, value) in values {
            frame.define(sym, value);
        }
        self.eval_body(Some(&frame), body)
    }

    /// `(loop test body...)`
    ///
    /// Runs until `test` evaluates to `Nothing`. Yields the last body value of
    /// the final iteration, `Nothing` if the body never ran.
    fn eval_loop(&mut self, scope: Option<&LexicalScope<'_>>, operands: &[Value]) -> EvalResult {
        let Some((test, body)) = operands.split_first() else {
            return Err(condition::malformed_form("loop", "missing test form"));
        };

        let mut last = Value::Nothing;
        while !self.eval_operand(scope, test)?.is_nothing() {
            last = self.eval_body(scope, body)?;
        }
        Ok(last)
    }

    /// `(error-handler protected ((name) handler-body...))`
    ///
    /// On a condition, the handler body runs in a fresh frame binding `name`
    /// to the condition's payload. Success values pass through untouched.
    fn eval_error_handler(
        &mut self,
        scope: Option<&LexicalScope<'_>>,
        operands: &[Value],
    ) -> EvalResult {
        let [protected, clause] = operands else {
            return Err(condition::malformed_form(
                "error-handler",
                "expected a protected form and a handler clause",
            ));
        };
        let Some((name, handler_body)) = handler_clause(clause) else {
            return Err(condition::malformed_form(
                "error-handler",
                "handler clause must look like ((name) body...)",
            ));
        };

        let result = self.evaluate(scope, protected);
        let Some(cond) = result.as_condition() else {
            return Ok(result);
        };
        tracing::trace!(kind = %cond.kind(), "condition handled");
        let frame = LexicalScope::new(scope);
        frame.define(name, cond.payload().clone());
        self.eval_body(Some(&frame), handler_body)
    }

    /// `(eval form)`: evaluate `form`, then evaluate the result.
    fn eval_eval(&mut self, scope: Option<&LexicalScope<'_>>, operands: &[Value]) -> EvalResult {
        let [form] = operands else {
            return Err(condition::arity_mismatch("eval", 1, operands.len()));
        };
        let code = self.eval_operand(scope, form)?;
        signal(self.evaluate(scope, &code))
    }
}

/// Split `((name) body...)` into the bound symbol and the body.
fn handler_clause(clause: &Value) -> Option<(Symbol, &[Value])> {
    let (params, body) = clause.as_sequence()?.split_first()?;
    match params.as_sequence()? {
        [Value::Symbol(name)] => Some((*name, body)),
        _ => None,
    }
}
