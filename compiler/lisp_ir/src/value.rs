//! Runtime values for the interpreter.
//!
//! `Value` is both the syntax tree and the runtime data: the reader builds
//! nested sequences of values, and the evaluator walks them as code.
//!
//! # Booleans
//!
//! Truth is presence: [`Value::True`] is true, [`Value::Nothing`] is false.
//! There is no false literal. `>` returns `Nothing` when the comparison fails,
//! and `loop` stops exactly when its test evaluates to `Nothing`.

use std::fmt;

use lisp_stack::ensure_sufficient_stack;

use crate::callable::Callable;
use crate::condition::{Condition, ConditionKind};
use crate::heap::Heap;
use crate::symbol::{Symbol, SymbolTable};

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Heap<str>),
    /// The one truthy boolean.
    True,
    Symbol(Symbol),
    /// Ordered sequence: a form when evaluated, a list when quoted.
    Sequence(Heap<[Value]>),
    Callable(Callable),
    /// Signaled error; see [`crate::condition`].
    Condition(Heap<Condition>),
    /// Absence of a value; also false.
    Nothing,
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap::from(s.as_ref()))
    }

    #[inline]
    pub fn symbol(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }

    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Heap::from(items))
    }

    /// Presence/absence boolean: `true` is `True`, `false` is `Nothing`.
    #[inline]
    pub fn from_bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::Nothing
        }
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Callable(callable)
    }
}

impl From<Condition> for Value {
    fn from(condition: Condition) -> Self {
        condition.into_value()
    }
}

// Accessors

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(sym) => Some(*sym),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            Value::Condition(c) => Some(c),
            _ => None,
        }
    }

    pub fn condition_kind(&self) -> Option<ConditionKind> {
        self.as_condition().map(Condition::kind)
    }

    #[inline]
    pub fn is_condition(&self) -> bool {
        matches!(self, Value::Condition(_))
    }

    #[inline]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// Anything except `Nothing` counts as true.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_nothing()
    }

    /// Element `i` of a sequence; `Nothing` past the end or for non-sequences.
    pub fn nth(&self, i: usize) -> Value {
        self.as_sequence()
            .and_then(|items| items.get(i))
            .cloned()
            .unwrap_or(Value::Nothing)
    }

    /// Elements from `i` on; empty past the end or for non-sequences.
    pub fn rest_from(&self, i: usize) -> &[Value] {
        self.as_sequence()
            .and_then(|items| items.get(i..))
            .unwrap_or(&[])
    }

    /// Sequence length; 0 for anything else.
    pub fn len(&self) -> usize {
        self.as_sequence().map_or(0, <[Value]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::True => "boolean",
            Value::Symbol(_) => "symbol",
            Value::Sequence(_) => "sequence",
            Value::Callable(c) if c.is_special() => "special form",
            Value::Callable(_) => "function",
            Value::Condition(_) => "condition",
            Value::Nothing => "nothing",
        }
    }

    /// Render for user output: strings unquoted, symbols by name.
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            symbols,
            quoted: false,
        }
    }

    /// Render as readable source: strings quoted and escaped.
    pub fn repr<'a>(&'a self, symbols: &'a SymbolTable) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            symbols,
            quoted: true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::True, Value::True) | (Value::Nothing, Value::Nothing) => true,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => ensure_sufficient_stack(|| a == b),
            (Value::Callable(a), Value::Callable(b)) => a.same(b),
            (Value::Condition(a), Value::Condition(b)) => ensure_sufficient_stack(|| a == b),
            _ => false,
        }
    }
}

/// Nested containers are released through a worklist, so freeing a deep
/// form costs heap instead of one native frame per level.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut value) = pending.pop() {
            detach_children(&mut value, &mut pending);
        }
    }
}

/// Move nested containers out of `value` when it holds the last handle.
fn detach_children(value: &mut Value, pending: &mut Vec<Value>) {
    match value {
        Value::Sequence(items) => {
            if let Some(items) = Heap::get_mut(items) {
                for item in items.iter_mut() {
                    if item.is_container() {
                        pending.push(std::mem::replace(item, Value::Nothing));
                    }
                }
            }
        }
        Value::Condition(cond) => {
            if let Some(cond) = Heap::get_mut(cond) {
                let payload = cond.payload_mut();
                if payload.is_container() {
                    pending.push(std::mem::replace(payload, Value::Nothing));
                }
            }
        }
        _ => {}
    }
}

impl Value {
    #[inline]
    fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Condition(_))
    }
}

/// Display adapter that resolves symbol names.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    symbols: &'a SymbolTable,
    quoted: bool,
}

impl ValueDisplay<'_> {
    fn nested<'b>(&'b self, value: &'b Value) -> ValueDisplay<'b> {
        ValueDisplay {
            value,
            symbols: self.symbols,
            quoted: self.quoted,
        }
    }
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if self.quoted => write!(f, "{x:?}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) if self.quoted => {
                f.write_str("\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            Value::Str(s) => f.write_str(s),
            Value::True => f.write_str("true"),
            Value::Symbol(sym) => f.write_str(self.symbols.lookup(*sym)),
            Value::Sequence(items) => ensure_sufficient_stack(|| {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", self.nested(item))?;
                }
                f.write_str(")")
            }),
            Value::Callable(c) => write!(f, "{c:?}"),
            Value::Condition(c) => ensure_sufficient_stack(|| {
                write!(f, "#<condition {}", c.kind())?;
                if !c.payload().is_nothing() {
                    write!(f, ": {}", self.nested(c.payload()))?;
                }
                f.write_str(">")
            }),
            Value::Nothing => f.write_str("nil"),
        }
    }
}
