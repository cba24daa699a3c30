//! Stack growth for recursion over nested values.
//!
//! Forms can nest as deep as the reader allows, and the reader is iterative.
//! Everything that walks a form recursively (evaluation, equality, printing)
//! wraps each level in [`ensure_sufficient_stack`] so that depth costs heap
//! instead of aborting the process.
//!
//! Native targets grow the stack with `stacker`; WASM is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
