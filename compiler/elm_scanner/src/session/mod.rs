//! In-memory stand-in for the parsing engine.
//!
//! [`ScanSession`] calls the scanner the way tree-sitter does: every call
//! starts at the current offset with a fresh lexer, an emitted token moves
//! the offset to the token's end, and a failed call leaves both the offset
//! and the scanner state where they were. The runtime restores the state of
//! the last emitted token before every call, so whatever a failed call
//! pops or queues is never seen again. [`ScanSession::consume`] plays the engine's own lexer for grammar
//! tokens, and [`Snapshot`]s model the save/restore cycle of speculative
//! parsing.

use elm_scanner_core::{EncodingIssueKind, SourceBuffer, SourceLexer, Span};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::state::StateError;
use crate::{Scanner, TokenKind, ValidSymbols};

/// A token emitted by the scanner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Saved scanner state plus the offset it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    state: Vec<u8>,
    offset: u32,
}

impl Snapshot {
    /// Serialized scanner state, exactly as the engine would store it.
    pub fn state_bytes(&self) -> &[u8] {
        &self.state
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("expected `{expected}` at byte {offset}, found `{found}`")]
    UnexpectedText {
        offset: u32,
        expected: String,
        found: String,
    },
    #[error(transparent)]
    State(#[from] StateError),
}

/// A scanner driven over one source text.
#[derive(Debug)]
pub struct ScanSession {
    buffer: SourceBuffer,
    scanner: Scanner,
    offset: u32,
}

impl ScanSession {
    pub fn new(source: &str) -> Self {
        Self::with_scanner(source, Scanner::new())
    }

    /// Start from an existing scanner, e.g. one with sections already open.
    pub fn with_scanner(source: &str, scanner: Scanner) -> Self {
        let buffer = SourceBuffer::new(source);
        for issue in buffer.encoding_issues() {
            match issue.kind {
                EncodingIssueKind::Utf8Bom => {
                    warn!(pos = issue.pos, "byte order mark shifts first-line columns");
                }
                EncodingIssueKind::InteriorNull => {
                    warn!(pos = issue.pos, "null byte ends comment and shader bodies early");
                }
            }
        }
        Self {
            buffer,
            scanner,
            offset: 0,
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }

    /// Byte offset the next call starts at.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Source text from the current offset on.
    pub fn rest(&self) -> &str {
        self.buffer.cursor().slice(self.offset, self.buffer.len())
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// One scanner call with `valid` as the grammar's expectations.
    ///
    /// On `None` the scanner is rolled back to its state before the call.
    pub fn scan(&mut self, valid: impl Into<ValidSymbols>) -> Option<Token> {
        let valid = valid.into();
        let committed = self.scanner.clone();
        let mut lexer = SourceLexer::at(&self.buffer, self.offset);
        let Some(kind) = self.scanner.scan(&mut lexer, valid) else {
            trace!("no token; state rolled back");
            self.scanner = committed;
            return None;
        };
        let span = lexer.token_span();
        debug!(%kind, %span, "emit");
        self.offset = span.end;
        Some(Token { kind, span })
    }

    /// Act as the engine's own lexer: skip whitespace, then require `text`.
    pub fn consume(&mut self, text: &str) -> Result<Span, SessionError> {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches([' ', '\n', '\r']);
        let start = self.offset + byte_len(&rest[..rest.len() - trimmed.len()]);
        if !trimmed.starts_with(text) {
            return Err(SessionError::UnexpectedText {
                offset: start,
                expected: text.to_owned(),
                found: trimmed.chars().take(text.chars().count()).collect(),
            });
        }
        let span = Span::new(start, start + byte_len(text));
        self.offset = span.end;
        Ok(span)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.scanner.state().to_bytes(),
            offset: self.offset,
        }
    }

    /// Rewind scanner state and offset to `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SessionError> {
        self.scanner.deserialize(&snapshot.state)?;
        self.offset = snapshot.offset;
        Ok(())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "sub-slices of a source whose length fits in u32"
)]
fn byte_len(text: &str) -> u32 {
    text.len() as u32
}

#[cfg(test)]
mod tests;
