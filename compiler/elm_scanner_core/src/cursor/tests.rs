use crate::SourceBuffer;

// === Navigation ===

#[test]
fn current_byte() {
    let buf = SourceBuffer::new("{-");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.current(), b'{');
    cursor.advance_char();
    assert_eq!(cursor.current(), b'-');
}

#[test]
fn advance_char_steps_over_multibyte() {
    let buf = SourceBuffer::new("é-");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.current_char(), 'é');
    cursor.advance_char();
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current_char(), '-');
}

#[test]
fn advance_char_at_eof_is_noop() {
    let buf = SourceBuffer::new("a");
    let mut cursor = buf.cursor();
    cursor.advance_char();
    assert!(cursor.is_eof());
    cursor.advance_char();
    assert_eq!(cursor.pos(), 1);
    assert_eq!(cursor.current_char(), '\0');
}

// === EOF ===

#[test]
fn empty_source_is_eof() {
    let buf = SourceBuffer::new("");
    assert!(buf.cursor().is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance_char();
    assert_eq!(cursor.current_char(), '\0');
    assert!(!cursor.is_eof());
}

// === Seeking and slicing ===

#[test]
fn seek_clamps_to_source_len() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    cursor.seek(99);
    assert_eq!(cursor.pos(), 3);
    assert!(cursor.is_eof());
}

#[test]
fn slice_and_slice_from() {
    let buf = SourceBuffer::new("let x = 1 in x");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.slice(10, 12), "in");
    cursor.seek(3);
    assert_eq!(cursor.slice_from(0), "let");
}

#[test]
fn slice_off_boundary_is_empty() {
    let buf = SourceBuffer::new("é");
    assert_eq!(buf.cursor().slice(0, 1), "");
}

#[test]
fn line_start_finds_previous_newline() {
    let buf = SourceBuffer::new("a =\n    b\n");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.line_start(), 0);
    cursor.seek(8);
    assert_eq!(cursor.line_start(), 4);
    cursor.seek(4);
    assert_eq!(cursor.line_start(), 4);
}

// === eat_until_newline_or_eof ===

#[test]
fn eat_until_newline_stops_before_newline() {
    let buf = SourceBuffer::new("-- comment\nx");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 10);
    assert_eq!(cursor.current(), b'\n');
}

#[test]
fn eat_until_newline_reaches_eof() {
    let buf = SourceBuffer::new("-- trailing");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}
