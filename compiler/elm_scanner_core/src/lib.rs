//! Low-level input side of the Elm layout scanner.
//!
//! - [`SourceBuffer`]: owned, sentinel-terminated copy of the source text.
//! - [`Cursor`]: byte cursor over that buffer with UTF-8 aware stepping.
//! - [`Lexer`]: the character-cursor contract a host engine offers the
//!   external scanner (lookahead, include/exclude advance, end marking,
//!   EOF and column queries).
//! - [`SourceLexer`]: an in-memory [`Lexer`] that reproduces tree-sitter's
//!   token span rules, used by the scanner's harness and tests.
//!
//! Nothing here knows about indentation or Elm tokens.

mod cursor;
mod lexer;
mod source_buffer;
mod span;

pub use cursor::Cursor;
pub use lexer::{Lexer, SourceLexer};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use span::Span;
