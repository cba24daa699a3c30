//! Scope chain: one global scope plus stack-allocated lexical frames.
//!
//! The global scope is a flat array indexed by symbol id. Lexical frames are
//! created by `let` and by `error-handler` clauses, live on the Rust stack for
//! the dynamic extent of that form, and link to their parent by reference.
//! The chain always ends at the global scope, which is never consulted through
//! a frame; [`GlobalScope::resolve`] and [`GlobalScope::assign`] walk the
//! frames first and fall back to the array.

use std::cell::RefCell;
use std::fmt;

use lisp_ir::{SharedSymbolTable, Symbol, Value};
use smallvec::SmallVec;

/// Minimum number of slots allocated on first growth.
const MIN_GLOBAL_CAPACITY: usize = 128;

/// Global bindings, indexed by symbol id.
///
/// Owns a handle to the symbol table so built-ins can be registered by name.
pub struct GlobalScope {
    symbols: SharedSymbolTable,
    values: Vec<Value>,
}

impl GlobalScope {
    pub fn new(symbols: SharedSymbolTable) -> Self {
        GlobalScope {
            symbols,
            values: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &SharedSymbolTable {
        &self.symbols
    }

    /// Number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Value bound to `sym`, `Nothing` if it was never set.
    #[inline]
    pub fn get(&self, sym: Symbol) -> Value {
        self.values.get(sym.index()).cloned().unwrap_or(Value::Nothing)
    }

    /// Bind `sym`, growing the slot array when the id is past the end.
    pub fn set(&mut self, sym: Symbol, value: Value) {
        let index = sym.index();
        if index >= self.values.len() {
            let grown = index.saturating_add(1).saturating_mul(3) / 2;
            self.values
                .resize(grown.max(MIN_GLOBAL_CAPACITY), Value::Nothing);
        }
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Intern `name` and bind it.
    pub fn define_builtin(&mut self, name: &str, value: Value) {
        let sym = self.symbols.intern(name);
        self.set(sym, value);
    }

    /// Resolve `sym` through `local` and its parents, then the globals.
    #[inline]
    pub fn resolve(&self, local: Option<&LexicalScope<'_>>, sym: Symbol) -> Value {
        local
            .and_then(|frame| frame.lookup(sym))
            .unwrap_or_else(|| self.get(sym))
    }

    /// Overwrite the nearest binding of `sym`, creating a global one if no
    /// frame declares it.
    pub fn assign(&mut self, local: Option<&LexicalScope<'_>>, sym: Symbol, value: Value) {
        let value = match local {
            Some(frame) => match frame.try_assign(sym, value) {
                Ok(()) => return,
                Err(value) => value,
            },
            None => value,
        };
        self.set(sym, value);
    }
}

impl fmt::Debug for GlobalScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = self.values.iter().filter(|v| !v.is_nothing()).count();
        f.debug_struct("GlobalScope")
            .field("capacity", &self.values.len())
            .field("bound", &bound)
            .finish_non_exhaustive()
    }
}

/// One frame of lexical bindings.
///
/// Frames are small, so bindings are a linear list scanned newest-first
/// (a later binding of the same symbol shadows an earlier one).
pub struct LexicalScope<'p> {
    bindings: RefCell<SmallVec<[(Symbol, Value); 4]>>,
    parent: Option<&'p LexicalScope<'p>>,
}

impl<'p> LexicalScope<'p> {
    /// Empty frame whose parent is `parent`, or the global scope when `None`.
    pub fn new(parent: Option<&'p LexicalScope<'p>>) -> Self {
        LexicalScope {
            bindings: RefCell::new(SmallVec::new()),
            parent,
        }
    }

    pub fn parent(&self) -> Option<&'p LexicalScope<'p>> {
        self.parent
    }

    /// Add a binding to this frame.
    pub fn define(&self, sym: Symbol, value: Value) {
        self.bindings.borrow_mut().push((sym, value));
    }

    /// Nearest binding of `sym` in this frame or its parents.
    pub fn lookup(&self, sym: Symbol) -> Option<Value> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if let Some(value) = current.lookup_local(sym) {
                return Some(value);
            }
            frame = current.parent;
        }
        None
    }

    /// Overwrite the nearest binding of `sym`.
    ///
    /// Returns the value back when no frame in the chain declares `sym`.
    pub fn try_assign(&self, sym: Symbol, value: Value) -> Result<(), Value> {
        let mut frame = Some(self);
        while let Some(current) = frame {
            let mut bindings = current.bindings.borrow_mut();
            if let Some(slot) = bindings.iter_mut().rev().find(|(s, _)| *s == sym) {
                slot.1 = value;
                return Ok(());
            }
            drop(bindings);
            frame = current.parent;
        }
        Err(value)
    }

    /// Bindings introduced by this frame only.
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    fn lookup_local(&self, sym: Symbol) -> Option<Value> {
        self.bindings
            .borrow()
            .iter()
            .rev()
            .find(|(s, _)| *s == sym)
            .map(|(_, v)| v.clone())
    }
}

impl fmt::Debug for LexicalScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<Symbol> = self.bindings.borrow().iter().map(|(s, _)| *s).collect();
        f.debug_struct("LexicalScope")
            .field("bound", &bound)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
