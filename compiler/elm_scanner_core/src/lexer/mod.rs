//! The character-cursor contract between a parsing engine and the layout
//! scanner, and an in-memory implementation of it.
//!
//! The contract is tree-sitter's `TSLexer` expressed as a trait:
//!
//! | operation | effect |
//! |-----------|--------|
//! | [`lookahead`](Lexer::lookahead) | current character, `'\0'` at EOF |
//! | [`advance`](Lexer::advance) | consume; the character belongs to the token |
//! | [`skip`](Lexer::skip) | consume; the token now starts after it |
//! | [`mark_end`](Lexer::mark_end) | the token ends here unless marked again |
//! | [`is_eof`](Lexer::is_eof) | end of input reached |
//! | [`column`](Lexer::column) | 0-based column of the lookahead character |

use crate::{Cursor, SourceBuffer, Span};

/// Character cursor offered to the scanner for one scan call.
pub trait Lexer {
    /// Current character, or `'\0'` at end of input.
    fn lookahead(&self) -> char;

    /// Consume the lookahead character as part of the token.
    fn advance(&mut self);

    /// Consume the lookahead character and move the token start past it.
    fn skip(&mut self);

    /// Record the current position as the end of the token being scanned.
    fn mark_end(&mut self);

    fn is_eof(&self) -> bool;

    /// 0-based column of the lookahead character on its line.
    fn column(&mut self) -> u32;

    /// Consume (as token content) everything up to, not including, the
    /// next `\n` or end of input.
    fn advance_to_line_end(&mut self) {
        while self.lookahead() != '\n' && !self.is_eof() {
            self.advance();
        }
    }
}

/// [`Lexer`] over a [`SourceBuffer`] with tree-sitter span semantics.
///
/// - A token ends at the last [`mark_end`](Lexer::mark_end), or at the
///   current position when it was never marked.
/// - A token starts after the last [`skip`](Lexer::skip), clamped so it
///   never starts after its end. Virtual layout tokens are marked before
///   any whitespace is skipped, which makes them zero-width.
/// - Columns count characters, not bytes.
#[derive(Clone, Debug)]
pub struct SourceLexer<'a> {
    cursor: Cursor<'a>,
    column: u32,
    token_start: u32,
    marked_end: Option<u32>,
}

impl<'a> SourceLexer<'a> {
    /// Start a scan call at the beginning of `buffer`.
    pub fn new(buffer: &'a SourceBuffer) -> Self {
        Self::at(buffer, 0)
    }

    /// Start a scan call at byte `offset`, the way the engine resumes after
    /// the previous token.
    pub fn at(buffer: &'a SourceBuffer, offset: u32) -> Self {
        let mut cursor = buffer.cursor();
        cursor.seek(offset);
        let line = cursor.slice(cursor.line_start(), cursor.pos());
        Self {
            column: count_chars(line),
            token_start: cursor.pos(),
            marked_end: None,
            cursor,
        }
    }

    /// Byte offset of the lookahead character.
    pub fn offset(&self) -> u32 {
        self.cursor.pos()
    }

    /// Span of the token the scanner would emit if it returned now.
    pub fn token_span(&self) -> Span {
        let end = self.marked_end.unwrap_or(self.cursor.pos());
        Span::new(self.token_start.min(end), end)
    }
}

impl Lexer for SourceLexer<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        self.cursor.current_char()
    }

    fn advance(&mut self) {
        if self.cursor.is_eof() {
            return;
        }
        if self.cursor.current() == b'\n' {
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.cursor.advance_char();
    }

    fn skip(&mut self) {
        self.advance();
        self.token_start = self.cursor.pos();
    }

    #[inline]
    fn mark_end(&mut self) {
        self.marked_end = Some(self.cursor.pos());
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    #[inline]
    fn column(&mut self) -> u32 {
        self.column
    }

    fn advance_to_line_end(&mut self) {
        let start = self.cursor.pos();
        self.cursor.eat_until_newline_or_eof();
        self.column += count_chars(self.cursor.slice_from(start));
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "a single line never exceeds the u32 source length"
)]
fn count_chars(text: &str) -> u32 {
    text.chars().count() as u32
}

#[cfg(test)]
mod tests;
