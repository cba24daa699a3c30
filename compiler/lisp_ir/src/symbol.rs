//! Symbol interning.
//!
//! Symbols are dense `u32` ids handed out in first-interning order, starting
//! at 0. The global scope indexes its value array directly by id, so ids are
//! never reused and nothing is ever removed from the table.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Interned symbol identifier.
///
/// Identity and equality are by id. The name is kept in the owning
/// [`SymbolTable`] and is only needed for printing and diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Symbol(u32);

impl Symbol {
    /// Create from a raw id.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Symbol(raw)
    }

    /// Get the raw id.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into id-addressed storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Error when interning a symbol fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More than `u32::MAX` distinct names were interned.
    #[error("symbol table exceeded capacity: {count} symbols, max is {max}", max = u32::MAX)]
    Overflow { count: usize },
}

/// Name storage behind the table's `RefCell`.
struct Names {
    /// Map from name to symbol.
    map: FxHashMap<&'static str, Symbol>,
    /// Names indexed by symbol id.
    names: Vec<&'static str>,
}

/// Interning table mapping names to dense symbol ids.
///
/// Interning takes `&self` so the parser, the global scope and built-ins that
/// print symbols can all hold the same table. Interned names are leaked to
/// `'static`: symbols live as long as the process.
///
/// # Thread Safety
/// Single-threaded (`RefCell`). The interpreter never shares a table across
/// threads.
pub struct SymbolTable {
    inner: RefCell<Names>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SymbolTable {
            inner: RefCell::new(Names {
                map: FxHashMap::default(),
                names: Vec::with_capacity(128),
            }),
        }
    }

    /// Try to intern a name, returning its symbol or an error on overflow.
    pub fn try_intern(&self, name: &str) -> Result<Symbol, InternError> {
        if let Some(&sym) = self.inner.borrow().map.get(name) {
            return Ok(sym);
        }

        let mut inner = self.inner.borrow_mut();
        let count = inner.names.len();
        let id = u32::try_from(count).map_err(|_| InternError::Overflow { count })?;

        let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
        let sym = Symbol(id);
        inner.names.push(leaked);
        inner.map.insert(leaked, sym);
        Ok(sym)
    }

    /// Intern a name, returning its symbol.
    ///
    /// Repeated calls with an equal name return an equal symbol.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` names are interned.
    #[inline]
    pub fn intern(&self, name: &str) -> Symbol {
        self.try_intern(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the name of a symbol.
    ///
    /// Symbols that did not come from this table render as `<unknown>`.
    pub fn lookup(&self, sym: Symbol) -> &'static str {
        self.inner
            .borrow()
            .names
            .get(sym.index())
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Find an already interned name without interning it.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.inner.borrow().map.get(name).copied()
    }

    /// Number of interned symbols.
    pub fn len(&self) -> usize {
        self.inner.borrow().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("len", &self.len())
            .finish()
    }
}

/// Cloneable handle to one symbol table.
///
/// The interpreter creates the table once and hands clones to the reader and
/// to built-ins that need symbol names.
#[derive(Clone, Default, Debug)]
pub struct SharedSymbolTable(Rc<SymbolTable>);

impl SharedSymbolTable {
    pub fn new() -> Self {
        SharedSymbolTable(Rc::new(SymbolTable::new()))
    }
}

impl Deref for SharedSymbolTable {
    type Target = SymbolTable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;
