//! Shared pointer for heap-allocated values.
//!
//! Strings, sequences, callables and conditions go through `Heap<T>` so that
//! quoting a form, binding it or returning it shares the allocation instead of
//! copying the tree. The interpreter is single-threaded, so this is `Rc`.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use lisp_stack::ensure_sufficient_stack;

/// Reference-counted, immutable heap value.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Wrap an already allocated `Rc` (used for unsized closures).
    #[inline]
    pub(crate) fn from_rc(rc: Rc<T>) -> Self {
        Heap(rc)
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Mutable access when `this` is the only handle.
    #[inline]
    pub(crate) fn get_mut(this: &mut Self) -> Option<&mut T> {
        Rc::get_mut(&mut this.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| fmt::Debug::fmt(&*self.0, f))
    }
}

impl From<&str> for Heap<str> {
    fn from(s: &str) -> Self {
        Heap(Rc::from(s))
    }
}

impl From<String> for Heap<str> {
    fn from(s: String) -> Self {
        Heap(Rc::from(s))
    }
}

impl<T> From<Vec<T>> for Heap<[T]> {
    fn from(items: Vec<T>) -> Self {
        Heap(Rc::from(items))
    }
}
