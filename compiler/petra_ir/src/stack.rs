//! Stack growth for recursive tree walks.
//!
//! Validation, type checking and lowering all recurse over the syntax tree.
//! Wrap each recursive step in [`ensure_sufficient_stack`] so that deeply
//! nested expressions grow the stack instead of overflowing it.

/// If less than this remains, grow the stack (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space allocated per growth (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
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
