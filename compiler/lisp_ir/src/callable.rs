//! Callable values and their call shapes.
//!
//! The evaluator never inspects a function to discover how to call it. Each
//! callable is tagged with its shape when it is bound, and the shape decides
//! how many operands are evaluated and how the result is produced.

use std::fmt;
use std::rc::Rc;

use crate::heap::Heap;
use crate::value::Value;

/// One evaluated argument.
pub type UnaryFn = dyn Fn(Value) -> Value;
/// Two evaluated arguments, left to right.
pub type BinaryFn = dyn Fn(Value, Value) -> Value;
/// Three evaluated arguments, left to right.
pub type TernaryFn = dyn Fn(Value, Value, Value) -> Value;
/// Any number of evaluated arguments.
pub type VariadicFn = dyn Fn(&[Value]) -> Value;
/// Any number of evaluated arguments, no result (the form yields `Nothing`).
pub type VariadicVoidFn = dyn Fn(&[Value]);

/// Forms that receive their operands unevaluated.
///
/// The evaluator owns one handler per tag; binding a symbol to
/// `Callable::Special(tag)` is what makes it a special form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    Quote,
    Set,
    Let,
    Loop,
    ErrorHandler,
    Eval,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 6] = [
        SpecialForm::Quote,
        SpecialForm::Set,
        SpecialForm::Let,
        SpecialForm::Loop,
        SpecialForm::ErrorHandler,
        SpecialForm::Eval,
    ];

    /// The symbol name the form is registered under.
    pub const fn name(self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::Set => "set",
            SpecialForm::Let => "let",
            SpecialForm::Loop => "loop",
            SpecialForm::ErrorHandler => "error-handler",
            SpecialForm::Eval => "eval",
        }
    }
}

/// A value that can sit in head position of a form.
#[derive(Clone)]
pub enum Callable {
    /// Receives the whole unevaluated form and the current scope.
    Special(SpecialForm),
    Unary {
        name: &'static str,
        func: Heap<UnaryFn>,
    },
    Binary {
        name: &'static str,
        func: Heap<BinaryFn>,
    },
    Ternary {
        name: &'static str,
        func: Heap<TernaryFn>,
    },
    Variadic {
        name: &'static str,
        func: Heap<VariadicFn>,
    },
    VariadicVoid {
        name: &'static str,
        func: Heap<VariadicVoidFn>,
    },
}

impl Callable {
    pub fn unary(name: &'static str, func: impl Fn(Value) -> Value + 'static) -> Self {
        Callable::Unary {
            name,
            func: Heap::from_rc(Rc::new(func) as Rc<UnaryFn>),
        }
    }

    pub fn binary(name: &'static str, func: impl Fn(Value, Value) -> Value + 'static) -> Self {
        Callable::Binary {
            name,
            func: Heap::from_rc(Rc::new(func) as Rc<BinaryFn>),
        }
    }

    pub fn ternary(
        name: &'static str,
        func: impl Fn(Value, Value, Value) -> Value + 'static,
    ) -> Self {
        Callable::Ternary {
            name,
            func: Heap::from_rc(Rc::new(func) as Rc<TernaryFn>),
        }
    }

    pub fn variadic(name: &'static str, func: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Callable::Variadic {
            name,
            func: Heap::from_rc(Rc::new(func) as Rc<VariadicFn>),
        }
    }

    pub fn variadic_void(name: &'static str, func: impl Fn(&[Value]) + 'static) -> Self {
        Callable::VariadicVoid {
            name,
            func: Heap::from_rc(Rc::new(func) as Rc<VariadicVoidFn>),
        }
    }

    /// Name the callable was registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Callable::Special(form) => form.name(),
            Callable::Unary { name, .. }
            | Callable::Binary { name, .. }
            | Callable::Ternary { name, .. }
            | Callable::Variadic { name, .. }
            | Callable::VariadicVoid { name, .. } => name,
        }
    }

    /// Fixed operand count, or `None` for variadic and special forms.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Callable::Unary { .. } => Some(1),
            Callable::Binary { .. } => Some(2),
            Callable::Ternary { .. } => Some(3),
            Callable::Special(_) | Callable::Variadic { .. } | Callable::VariadicVoid { .. } => {
                None
            }
        }
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        matches!(self, Callable::Special(_))
    }

    /// Identity comparison: same special form, or the same function object.
    pub fn same(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Special(a), Callable::Special(b)) => a == b,
            (Callable::Unary { func: a, .. }, Callable::Unary { func: b, .. }) => {
                Heap::ptr_eq(a, b)
            }
            (Callable::Binary { func: a, .. }, Callable::Binary { func: b, .. }) => {
                Heap::ptr_eq(a, b)
            }
            (Callable::Ternary { func: a, .. }, Callable::Ternary { func: b, .. }) => {
                Heap::ptr_eq(a, b)
            }
            (Callable::Variadic { func: a, .. }, Callable::Variadic { func: b, .. }) => {
                Heap::ptr_eq(a, b)
            }
            (Callable::VariadicVoid { func: a, .. }, Callable::VariadicVoid { func: b, .. }) => {
                Heap::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Special(form) => write!(f, "<special {}>", form.name()),
            _ => write!(f, "<builtin {}>", self.name()),
        }
    }
}
