//! External scanner for tree-sitter-elm.
//!
//! Elm is layout sensitive: `let` blocks, `case` branches and top-level
//! declarations are delimited by indentation, not by brackets. The grammar
//! cannot see columns, so it asks this scanner for three virtual tokens
//! ([`TokenKind::OpenSection`], [`TokenKind::EndSection`],
//! [`TokenKind::EndDecl`]) and for three tokens a context-free lexer handles
//! badly (glued negation, block-comment bodies, GLSL shader bodies).
//!
//! # Architecture
//!
//! - [`ScannerState`]: indentation stack, runback queue, indent length.
//!   Serializes into the engine's fixed snapshot buffer.
//! - [`Scanner`]: the per-call decision procedure.
//! - `comments`: sub-scanners for nested block comments, line comments and
//!   the two opaque literal modes.
//! - [`ScanSession`]: drives a scanner over a string the way the engine
//!   does, for tests and tooling.
//! - `ffi` (feature `ffi`): the `tree_sitter_elm_external_scanner_*` ABI.
//!
//! # Debugging
//!
//! - `RUST_LOG=elm_scanner=debug`: indentation stack and runback mutations.
//! - `RUST_LOG=elm_scanner=trace`: every classification step.

mod comments;
mod indent_stack;
mod runback;
mod scanner;
mod session;
mod state;
mod token_kind;

#[cfg(feature = "ffi")]
#[allow(
    unsafe_code,
    reason = "the tree-sitter runtime hands the scanner raw pointers"
)]
pub mod ffi;

pub use elm_scanner_core::{Lexer, SourceBuffer, SourceLexer, Span};
pub use indent_stack::{IndentStack, MAX_INDENT_FRAMES};
pub use runback::{Runback, RUNBACK_CAPACITY};
pub use scanner::Scanner;
pub use session::{ScanSession, SessionError, Snapshot, Token};
pub use state::{ScannerState, StateError, SERIALIZATION_BUFFER_SIZE};
pub use token_kind::{TokenKind, ValidSymbols};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Installs a subscriber only when `RUST_LOG`
/// is set, so hosts that bring their own subscriber are left alone.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
