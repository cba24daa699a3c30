//! Built-in bindings installed into every fresh global scope.

use std::fmt::Write;

use lisp_ir::{condition, Callable, SharedSymbolTable, SpecialForm, Value};

use crate::environment::GlobalScope;
use crate::print_handler::SharedPrintHandler;

/// Bind the special forms and built-in functions.
pub(crate) fn register(globals: &mut GlobalScope, print_handler: SharedPrintHandler) {
    for form in SpecialForm::ALL {
        globals.define_builtin(form.name(), Value::from(Callable::Special(form)));
    }

    globals.define_builtin("+", Value::from(Callable::binary("+", add)));
    globals.define_builtin(">", Value::from(Callable::binary(">", greater)));
    globals.define_builtin("raise", Value::from(Callable::unary("raise", condition::raised)));

    let println = println_to(globals.symbols().clone(), print_handler);
    globals.define_builtin("println", Value::from(Callable::variadic_void("println", println)));
}

/// Numeric operand as a float, for mixed int/float arithmetic.
#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// `+`: checked for integers, promoted to float when either side is a float.
pub(crate) fn add(left: Value, right: Value) -> Value {
    if let (Value::Int(a), Value::Int(b)) = (&left, &right) {
        return a
            .checked_add(*b)
            .map_or_else(|| condition::integer_overflow("+"), Value::int);
    }
    match (as_f64(&left), as_f64(&right)) {
        (Some(a), Some(b)) => Value::float(a + b),
        _ => condition::type_mismatch("+", left.type_name(), right.type_name()),
    }
}

/// `>`: `True` when `left` is greater, `Nothing` otherwise.
pub(crate) fn greater(left: Value, right: Value) -> Value {
    if let (Value::Int(a), Value::Int(b)) = (&left, &right) {
        return Value::from_bool(a > b);
    }
    match (as_f64(&left), as_f64(&right)) {
        (Some(a), Some(b)) => Value::from_bool(a > b),
        _ => condition::type_mismatch(">", left.type_name(), right.type_name()),
    }
}

/// `println`: display form of each argument, no separator, one newline.
fn println_to(
    symbols: SharedSymbolTable,
    print_handler: SharedPrintHandler,
) -> impl Fn(&[Value]) + 'static {
    move |args| {
        let mut line = String::new();
        for arg in args {
            let _ = write!(line, "{}", arg.display(&symbols));
        }
        print_handler.println(&line);
    }
}
