use pretty_assertions::assert_eq;

use super::*;
use crate::SERIALIZATION_BUFFER_SIZE;

const LAYOUT: ValidSymbols = ValidSymbols::END_DECL.union(ValidSymbols::END_SECTION);

#[test]
fn emitted_token_moves_offset_to_its_end() {
    let mut session = ScanSession::new("  -x");
    let token = session.scan(TokenKind::MinusWithoutTrailingWhitespace);
    assert_eq!(
        token,
        Some(Token {
            kind: TokenKind::MinusWithoutTrailingWhitespace,
            span: Span::new(2, 3),
        })
    );
    assert_eq!(session.offset(), 3);
    assert_eq!(session.rest(), "x");
}

#[test]
fn virtual_token_leaves_offset_in_place() {
    let mut session = ScanSession::new("a = 1\nb = 2");
    session.consume("a = 1").ok();
    let token = session.scan(LAYOUT);
    assert_eq!(
        token,
        Some(Token {
            kind: TokenKind::EndDecl,
            span: Span::point(5),
        })
    );
    assert_eq!(session.offset(), 5);
    assert_eq!(session.consume("b"), Ok(Span::new(6, 7)));
}

#[test]
fn failed_scan_keeps_offset() {
    let mut session = ScanSession::new("   foo");
    assert_eq!(session.scan(LAYOUT), None);
    assert_eq!(session.offset(), 0);
}

#[test]
fn failed_scan_leaves_scanner_untouched() {
    let mut scanner = Scanner::new();
    scanner.state_mut().indents_mut().push(4);
    let mut session = ScanSession::with_scanner("\nfoo", scanner.clone());

    // Resolution pops the section and queues `EndSection`, `EndDecl`, but
    // `EndSection` is not accepted: nothing may survive the call.
    assert_eq!(session.scan(ValidSymbols::END_DECL), None);
    assert_eq!(session.scan(ValidSymbols::END_DECL), None);
    assert_eq!(session.scanner(), &scanner);

    assert_eq!(
        session.scan(LAYOUT).map(|t| t.kind),
        Some(TokenKind::EndSection)
    );
}

#[test]
fn failed_scan_keeps_measured_indent() {
    let mut scanner = Scanner::new();
    scanner.state_mut().set_indent_length(7);
    let mut session = ScanSession::with_scanner("\n  x", scanner);
    assert_eq!(session.scan(ValidSymbols::empty()), None);
    assert_eq!(session.scanner().state().indent_length(), 7);
}

#[test]
fn consume_skips_whitespace() {
    let mut session = ScanSession::new(" \r\n  let x");
    assert_eq!(session.consume("let"), Ok(Span::new(5, 8)));
    assert_eq!(session.rest(), " x");
    assert_eq!(session.consume("x"), Ok(Span::new(9, 10)));
    assert!(session.is_eof());
}

#[test]
fn consume_reports_mismatch() {
    let mut session = ScanSession::new("  case x of");
    let err = session.consume("let");
    assert_eq!(
        err,
        Err(SessionError::UnexpectedText {
            offset: 2,
            expected: "let".to_owned(),
            found: "cas".to_owned(),
        })
    );
    assert_eq!(session.offset(), 0);
    assert_eq!(
        err.map_err(|e| e.to_string()),
        Err("expected `let` at byte 2, found `cas`".to_owned())
    );
}

#[test]
fn snapshot_restores_state_and_offset() {
    let mut session = ScanSession::new("let\n    a = 1\nin a");
    session.consume("let").ok();
    assert_eq!(
        session.scan(ValidSymbols::OPEN_SECTION).map(|t| t.kind),
        Some(TokenKind::OpenSection)
    );
    let snapshot = session.snapshot();
    assert_eq!(snapshot.offset(), 3);
    assert!(snapshot.state_bytes().len() <= SERIALIZATION_BUFFER_SIZE);

    session.consume("a = 1").ok();
    assert_eq!(
        session.scan(LAYOUT).map(|t| t.kind),
        Some(TokenKind::EndSection)
    );
    assert_eq!(session.scanner().state().indents().as_slice(), &[0]);

    assert_eq!(session.restore(&snapshot), Ok(()));
    assert_eq!(session.offset(), 3);
    assert_eq!(session.scanner().state().indents().as_slice(), &[0, 4]);
    assert!(session.scanner().state().runback().is_empty());
}

#[test]
fn restore_rejects_corrupt_snapshot() {
    let mut session = ScanSession::new("foo");
    session.scanner_mut().state_mut().indents_mut().push(2);
    let corrupt = Snapshot {
        state: vec![0; 3],
        offset: 1,
    };
    assert_eq!(
        session.restore(&corrupt),
        Err(SessionError::State(StateError::Truncated {
            needed: 14,
            found: 3,
        }))
    );
    assert_eq!(session.offset(), 0);
    assert_eq!(session.scanner().state().indents().as_slice(), &[0, 2]);
}

#[test]
fn byte_order_mark_is_tolerated() {
    let mut session = ScanSession::new("\u{feff}a = 1\nb");
    session.consume("\u{feff}a = 1").ok();
    assert_eq!(
        session.scan(LAYOUT).map(|t| t.kind),
        Some(TokenKind::EndDecl)
    );
}

#[test]
fn with_scanner_keeps_open_sections() {
    let mut scanner = Scanner::new();
    scanner.state_mut().indents_mut().push(4);
    let mut session = ScanSession::with_scanner("\nx", scanner);
    let kinds: Vec<_> = (0..2)
        .filter_map(|_| session.scan(LAYOUT))
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, vec![TokenKind::EndSection, TokenKind::EndDecl]);
    assert_eq!(session.scanner().state().indents().as_slice(), &[0]);
}
