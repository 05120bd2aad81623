//! Sub-scanners for comments, the `in` keyword and opaque literal bodies.
//!
//! All of these consume characters through the [`Lexer`] contract and
//! leave the choice of token to the classifier.

use elm_scanner_core::Lexer;
use elm_stack::ensure_sufficient_stack;

use crate::ValidSymbols;

/// Outcome of looking for the `in` that closes a `let` block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum InMatch {
    /// Lookahead was not `i`; nothing consumed.
    NoMatch,
    /// Consumed `i` (and possibly `n`) but the keyword did not follow.
    /// The consumed characters stay consumed.
    Partial,
    /// Consumed `in` followed by whitespace or end of input.
    Found,
}

/// Whitespace that may follow the `in` keyword.
fn is_elm_space(c: char) -> bool {
    matches!(c, ' ' | '\r' | '\n')
}

/// Skip over `in` when the grammar could close a section here.
pub(crate) fn check_for_in<L: Lexer + ?Sized>(lexer: &mut L, valid: ValidSymbols) -> InMatch {
    if !valid.contains(ValidSymbols::END_SECTION) || lexer.lookahead() != 'i' {
        return InMatch::NoMatch;
    }
    lexer.skip();
    if lexer.lookahead() != 'n' {
        return InMatch::Partial;
    }
    lexer.skip();
    if is_elm_space(lexer.lookahead()) || lexer.is_eof() {
        InMatch::Found
    } else {
        InMatch::Partial
    }
}

/// Consume a `{- ... -}` comment including nested comments.
///
/// Marks the token end at the opening `{` first. Returns `false` when the
/// input does not start with `{-` (having consumed the `{` if present).
/// An unterminated comment runs to end of input and still counts as a
/// comment.
pub(crate) fn scan_block_comment<L: Lexer + ?Sized>(lexer: &mut L) -> bool {
    lexer.mark_end();
    if lexer.lookahead() != '{' {
        return false;
    }
    lexer.advance();
    if lexer.lookahead() != '-' {
        return false;
    }
    lexer.advance();

    loop {
        match lexer.lookahead() {
            '{' => {
                ensure_sufficient_stack(|| scan_block_comment(lexer));
            }
            '-' => {
                lexer.advance();
                if lexer.lookahead() == '}' {
                    lexer.advance();
                    return true;
                }
            }
            '\0' => return true,
            _ => lexer.advance(),
        }
    }
}

/// Consume the body of a block comment whose `{-` the grammar already
/// matched, marking the end just before the closing `-}`.
///
/// Nested comments are consumed whole so their `-}` does not end the body.
pub(crate) fn scan_block_comment_content<L: Lexer + ?Sized>(lexer: &mut L) {
    lexer.mark_end();
    loop {
        match lexer.lookahead() {
            '\0' => break,
            '-' => {
                lexer.mark_end();
                lexer.advance();
                if lexer.lookahead() == '}' {
                    break;
                }
            }
            '{' => {
                if scan_block_comment(lexer) {
                    lexer.mark_end();
                    lexer.advance();
                    if lexer.lookahead() == '-' {
                        break;
                    }
                }
            }
            _ => lexer.advance(),
        }
    }
}

/// Consume a shader body up to the closing `|]`, marking the end before
/// the `|`. Without a terminator the body runs to end of input.
pub(crate) fn scan_glsl_content<L: Lexer + ?Sized>(lexer: &mut L) {
    loop {
        match lexer.lookahead() {
            '|' => {
                lexer.mark_end();
                lexer.advance();
                if lexer.lookahead() == ']' {
                    lexer.advance();
                    return;
                }
            }
            '\0' => {
                lexer.mark_end();
                return;
            }
            _ => lexer.advance(),
        }
    }
}
