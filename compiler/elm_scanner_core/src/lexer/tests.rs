use pretty_assertions::assert_eq;

use super::*;

#[test]
fn lookahead_reports_nul_at_eof() {
    let buf = SourceBuffer::new("");
    let lexer = SourceLexer::new(&buf);
    assert!(lexer.is_eof());
    assert_eq!(lexer.lookahead(), '\0');
}

#[test]
fn unmarked_token_ends_at_cursor() {
    let buf = SourceBuffer::new("-x");
    let mut lexer = SourceLexer::new(&buf);
    lexer.advance();
    assert_eq!(lexer.token_span(), Span::new(0, 1));
}

#[test]
fn skip_moves_token_start() {
    let buf = SourceBuffer::new("   abc");
    let mut lexer = SourceLexer::new(&buf);
    for _ in 0..3 {
        lexer.skip();
    }
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.token_span(), Span::new(3, 5));
}

#[test]
fn mark_before_skip_gives_zero_width_token() {
    let buf = SourceBuffer::new("\n    foo");
    let mut lexer = SourceLexer::new(&buf);
    lexer.mark_end();
    for _ in 0..5 {
        lexer.skip();
    }
    assert_eq!(lexer.token_span(), Span::point(0));
}

#[test]
fn last_mark_end_wins() {
    let buf = SourceBuffer::new("abc|]");
    let mut lexer = SourceLexer::new(&buf);
    lexer.mark_end();
    lexer.advance();
    lexer.advance();
    lexer.advance();
    lexer.mark_end();
    lexer.advance();
    assert_eq!(lexer.token_span(), Span::new(0, 3));
}

#[test]
fn column_tracks_newlines() {
    let buf = SourceBuffer::new("ab\n  c");
    let mut lexer = SourceLexer::new(&buf);
    lexer.advance();
    assert_eq!(lexer.column(), 1);
    lexer.advance();
    lexer.skip();
    assert_eq!(lexer.column(), 0);
    lexer.skip();
    lexer.skip();
    assert_eq!(lexer.column(), 2);
    assert_eq!(lexer.lookahead(), 'c');
}

#[test]
fn column_counts_characters_not_bytes() {
    let buf = SourceBuffer::new("éé x");
    let mut lexer = SourceLexer::new(&buf);
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.column(), 2);
    assert_eq!(lexer.offset(), 4);
}

#[test]
fn resuming_mid_line_recomputes_column() {
    let buf = SourceBuffer::new("main =\n    text");
    let mut lexer = SourceLexer::at(&buf, 11);
    assert_eq!(lexer.column(), 4);
    assert_eq!(lexer.lookahead(), 't');
    assert_eq!(lexer.token_span(), Span::point(11));
}

#[test]
fn advance_to_line_end_matches_char_loop() {
    let source = "-- ünïcode comment\nnext";
    let buf = SourceBuffer::new(source);

    let mut fast = SourceLexer::new(&buf);
    fast.advance_to_line_end();

    // Default trait body, driven through a wrapper that does not override it.
    struct Plain<'a>(SourceLexer<'a>);
    impl Lexer for Plain<'_> {
        fn lookahead(&self) -> char {
            self.0.lookahead()
        }
        fn advance(&mut self) {
            self.0.advance();
        }
        fn skip(&mut self) {
            self.0.skip();
        }
        fn mark_end(&mut self) {
            self.0.mark_end();
        }
        fn is_eof(&self) -> bool {
            self.0.is_eof()
        }
        fn column(&mut self) -> u32 {
            self.0.column()
        }
    }
    let mut slow = Plain(SourceLexer::new(&buf));
    slow.advance_to_line_end();

    assert_eq!(fast.offset(), slow.0.offset());
    assert_eq!(fast.column(), slow.column());
    assert_eq!(fast.lookahead(), '\n');
}

#[test]
fn advance_at_eof_is_noop() {
    let buf = SourceBuffer::new("x");
    let mut lexer = SourceLexer::new(&buf);
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.offset(), 1);
    assert_eq!(lexer.column(), 1);
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_column {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn column_matches_chars_since_last_newline(
            chars in proptest::collection::vec(
                prop_oneof![Just(' '), Just('\n'), Just('x'), Just('é'), Just('-')],
                0..80,
            ),
            stop in 0usize..80,
        ) {
            let source: String = chars.iter().collect();
            let buf = SourceBuffer::new(&source);
            let mut lexer = SourceLexer::new(&buf);
            let steps = stop.min(chars.len());
            for _ in 0..steps {
                lexer.advance();
            }
            let consumed: String = chars[..steps].iter().collect();
            let expected = consumed
                .rsplit('\n')
                .next()
                .map_or(0, |line| line.chars().count());
            prop_assert_eq!(lexer.column() as usize, expected);

            // Resuming from the same offset must agree with the running count.
            let mut resumed = SourceLexer::at(&buf, lexer.offset());
            prop_assert_eq!(resumed.column(), lexer.column());
        }
    }
}
