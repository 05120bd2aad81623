//! Stack growth guard for recursive sub-scanners.
//!
//! Elm block comments nest (`{- a {- b -} c -}`), and the scanner consumes
//! them with a recursive descent. Source files with thousands of unbalanced
//! `{-` openers are legal input, so each recursion level is routed through
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call. tree-sitter grammars are commonly built
//!   for the web, where the runtime manages the stack.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn scan_nested(lexer: &mut impl Lexer) -> bool {
///     ensure_sufficient_stack(|| {
///         // ... consume `{-`, recurse on inner `{` ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
