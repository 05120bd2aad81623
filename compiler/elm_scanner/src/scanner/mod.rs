//! Token classifier: one decision per engine call.
//!
//! # Decision order
//!
//! 1. Replay a pending runback token if the grammar accepts it.
//! 2. Skip spaces, carriage returns and newlines, measuring the indentation
//!    of the last line crossed. End of input closes a section or declaration.
//! 3. A leading `-` is either a glued negation, a line comment (after a
//!    newline), or a failure.
//! 4. `in` on the same line closes the `let` section immediately.
//! 5. Open a section at the current column.
//! 6. Block-comment body.
//! 7. After a newline, compare the indentation with the stack and queue the
//!    closing tokens.
//! 8. GLSL body.
//!
//! Once a line comment has been skipped the token end must not move past
//! it, or the comment would become part of the emitted token.

use std::cmp::Ordering;
use std::ops::ControlFlow;

use elm_scanner_core::Lexer;
use tracing::trace;

use crate::comments::{self, InMatch};
use crate::state::{ScannerState, StateError};
use crate::{TokenKind, ValidSymbols};

/// Layout scanner for one parse session.
///
/// Holds no references: the engine owns it, snapshots it with
/// [`serialize`](Scanner::serialize) and rewinds it with
/// [`deserialize`](Scanner::deserialize).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scanner {
    state: ScannerState,
}

/// Facts gathered during a single scan call.
#[derive(Debug)]
struct Pass {
    has_newline: bool,
    found_in: bool,
    /// Cleared once a line comment has been consumed.
    can_mark_end: bool,
}

impl Pass {
    fn new() -> Self {
        Self {
            has_newline: false,
            found_in: false,
            can_mark_end: true,
        }
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: ScannerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScannerState {
        &mut self.state
    }

    /// Write the state snapshot into `buf`; see [`ScannerState::serialize`].
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        self.state.serialize(buf)
    }

    /// Restore a snapshot; an empty slice resets to the fresh state.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        self.state.restore(bytes)
    }

    /// Decide whether to emit a token at the lexer's position.
    ///
    /// Returns `None` when no external token applies; the engine then falls
    /// back to its own lexer. The emitted token ends at the lexer's last
    /// marked position.
    pub fn scan<L: Lexer + ?Sized>(
        &mut self,
        lexer: &mut L,
        valid: ValidSymbols,
    ) -> Option<TokenKind> {
        if let Some(kind) = self.replay(valid) {
            trace!(%kind, "replay runback");
            return Some(kind);
        }
        // Whatever is left was decided on a path the engine abandoned.
        self.state.runback.clear();

        let mut pass = Pass::new();
        lexer.mark_end();

        if let ControlFlow::Break(result) = self.skip_whitespace(lexer, valid, &mut pass) {
            return result;
        }

        if comments::check_for_in(lexer, valid) == InMatch::Found {
            if pass.has_newline {
                pass.found_in = true;
            } else {
                trace!("`in` on the same line closes the section");
                // Error recovery offers every kind at once, even at top level.
                if self.state.indents.len() > 1 {
                    self.state.indents.pop();
                }
                return Some(TokenKind::EndSection);
            }
        }

        if valid.contains(ValidSymbols::OPEN_SECTION) && !lexer.is_eof() {
            let column = lexer.column();
            self.state.indents.push(column);
            return Some(TokenKind::OpenSection);
        }

        if valid.contains(ValidSymbols::BLOCK_COMMENT_CONTENT) {
            if !pass.can_mark_end {
                return None;
            }
            comments::scan_block_comment_content(lexer);
            return Some(TokenKind::BlockCommentContent);
        }

        if pass.has_newline {
            self.resolve_indentation(lexer, &mut pass);

            if let Some(kind) = self.replay(valid) {
                trace!(%kind, indent = self.state.indent_length, "layout token");
                return Some(kind);
            }
            if lexer.is_eof() && valid.contains(ValidSymbols::END_SECTION) {
                return Some(TokenKind::EndSection);
            }
        }

        if valid.contains(ValidSymbols::GLSL_CONTENT) {
            if !pass.can_mark_end {
                return None;
            }
            comments::scan_glsl_content(lexer);
            return Some(TokenKind::GlslContent);
        }

        trace!("no external token");
        None
    }

    /// Pop the next pending token if the grammar accepts it here.
    fn replay(&mut self, valid: ValidSymbols) -> Option<TokenKind> {
        let runback = &mut self.state.runback;
        if !runback.is_empty() && valid.accepts(runback.peek()) {
            Some(runback.pop())
        } else {
            None
        }
    }

    /// Steps 2 and 3: whitespace, newlines, a leading `-`, end of input.
    ///
    /// Breaks with the call's final answer, or continues with the lexer on
    /// the first character that is none of those.
    fn skip_whitespace<L: Lexer + ?Sized>(
        &mut self,
        lexer: &mut L,
        valid: ValidSymbols,
        pass: &mut Pass,
    ) -> ControlFlow<Option<TokenKind>> {
        loop {
            match lexer.lookahead() {
                ' ' | '\r' => lexer.skip(),
                '\n' => {
                    lexer.skip();
                    pass.has_newline = true;
                    while lexer.lookahead() == ' ' {
                        lexer.skip();
                    }
                    self.state.indent_length = lexer.column();
                }
                '-' if !valid.contains(ValidSymbols::BLOCK_COMMENT_CONTENT) => {
                    lexer.advance();
                    let next = lexer.lookahead();
                    if valid.contains(ValidSymbols::MINUS_WITHOUT_TRAILING_WHITESPACE)
                        && (next.is_ascii_alphabetic() || next == '(')
                    {
                        if !pass.can_mark_end {
                            return ControlFlow::Break(None);
                        }
                        lexer.mark_end();
                        return ControlFlow::Break(Some(
                            TokenKind::MinusWithoutTrailingWhitespace,
                        ));
                    }
                    if next == '-' && pass.has_newline {
                        trace!("skip line comment");
                        pass.can_mark_end = false;
                        lexer.advance();
                        lexer.advance_to_line_end();
                    } else {
                        return ControlFlow::Break(None);
                    }
                }
                _ if lexer.is_eof() => {
                    if valid.contains(ValidSymbols::END_SECTION) {
                        return ControlFlow::Break(Some(TokenKind::EndSection));
                    }
                    if valid.contains(ValidSymbols::END_DECL) {
                        return ControlFlow::Break(Some(TokenKind::EndDecl));
                    }
                    return ControlFlow::Continue(());
                }
                _ => return ControlFlow::Continue(()),
            }
        }
    }

    /// Step 7: queue the tokens that bring the stack in line with the
    /// indentation of the new line.
    fn resolve_indentation<L: Lexer + ?Sized>(&mut self, lexer: &mut L, pass: &mut Pass) {
        let state = &mut self.state;
        state.runback.clear();

        loop {
            match state.indent_length.cmp(&state.indents.top()) {
                Ordering::Less => {
                    state.indents.pop();
                    state.runback.push(TokenKind::EndSection);
                    pass.found_in = false;
                }
                Ordering::Equal => {
                    if pass.found_in {
                        state.runback.push(TokenKind::EndSection);
                        pass.found_in = false;
                        break;
                    }
                    // A comment starting at the boundary is not a new
                    // declaration; leave it for the next call.
                    if lexer.lookahead() == '-' {
                        lexer.skip();
                        if lexer.lookahead() == '-' {
                            break;
                        }
                    }
                    if lexer.lookahead() == '{' {
                        lexer.skip();
                        if lexer.lookahead() == '-' {
                            break;
                        }
                    }
                    state.runback.push(TokenKind::EndDecl);
                    break;
                }
                Ordering::Greater => break,
            }
        }

        // `let` and the last line of its body can line up so that the
        // equality branch never saw the `in`.
        if pass.found_in {
            state.runback.push(TokenKind::EndSection);
            pass.found_in = false;
        }
    }
}
