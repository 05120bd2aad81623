//! C ABI for the tree-sitter runtime.
//!
//! The generated `parser.c` of tree-sitter-elm declares five functions
//! named `tree_sitter_elm_external_scanner_*`; linking this crate's
//! `staticlib` in place of a C scanner provides them.
//!
//! # Safety
//!
//! The entry points are called only by the tree-sitter runtime, which
//! guarantees:
//!
//! - `payload` is the pointer returned by `create` and is not yet destroyed
//! - `lexer` points to a live `TSLexer` for the duration of `scan`
//! - `valid_symbols` holds one `bool` per external token
//! - `serialize` receives a buffer of [`SERIALIZATION_BUFFER_SIZE`] bytes
//!
//! They are not marked `unsafe` because they are FFI entry points, not
//! Rust API functions.

#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from the tree-sitter runtime which guarantees validity"
)]

use std::ffi::{c_char, c_uint, c_void};
use std::slice;

use tracing::warn;

use crate::{Lexer, Scanner, TokenKind, ValidSymbols, SERIALIZATION_BUFFER_SIZE};

/// Leading fields of tree-sitter's `TSLexer`, in declaration order.
///
/// Later runtime versions append fields (a logging callback); the scanner
/// only ever reads through a pointer, so the prefix is enough.
#[repr(C)]
pub struct TSLexer {
    pub lookahead: i32,
    pub result_symbol: u16,
    pub advance: unsafe extern "C" fn(*mut TSLexer, bool),
    pub mark_end: unsafe extern "C" fn(*mut TSLexer),
    pub get_column: unsafe extern "C" fn(*mut TSLexer) -> u32,
    pub is_at_included_range_start: unsafe extern "C" fn(*const TSLexer) -> bool,
    pub eof: unsafe extern "C" fn(*const TSLexer) -> bool,
}

/// [`Lexer`] over the runtime's lexer for one scan call.
struct RuntimeLexer {
    raw: *mut TSLexer,
}

impl Lexer for RuntimeLexer {
    fn lookahead(&self) -> char {
        // SAFETY: `raw` is live for the scan call.
        let code = unsafe { (*self.raw).lookahead };
        u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn advance(&mut self) {
        // SAFETY: `raw` is live for the scan call.
        unsafe { ((*self.raw).advance)(self.raw, false) }
    }

    fn skip(&mut self) {
        // SAFETY: `raw` is live for the scan call.
        unsafe { ((*self.raw).advance)(self.raw, true) }
    }

    fn mark_end(&mut self) {
        // SAFETY: `raw` is live for the scan call.
        unsafe { ((*self.raw).mark_end)(self.raw) }
    }

    fn is_eof(&self) -> bool {
        // SAFETY: `raw` is live for the scan call.
        unsafe { ((*self.raw).eof)(self.raw) }
    }

    fn column(&mut self) -> u32 {
        // SAFETY: `raw` is live for the scan call.
        unsafe { ((*self.raw).get_column)(self.raw) }
    }
}

#[no_mangle]
pub extern "C" fn tree_sitter_elm_external_scanner_create() -> *mut c_void {
    crate::init_tracing();
    Box::into_raw(Box::new(Scanner::new())).cast()
}

#[no_mangle]
pub extern "C" fn tree_sitter_elm_external_scanner_destroy(payload: *mut c_void) {
    if payload.is_null() {
        return;
    }
    // SAFETY: `payload` came from `create` and is destroyed exactly once.
    drop(unsafe { Box::from_raw(payload.cast::<Scanner>()) });
}

/// Write the scanner state into the runtime's snapshot buffer.
#[no_mangle]
pub extern "C" fn tree_sitter_elm_external_scanner_serialize(
    payload: *mut c_void,
    buffer: *mut c_char,
) -> c_uint {
    // SAFETY: `payload` came from `create`.
    let scanner = unsafe { &*payload.cast::<Scanner>() };
    // SAFETY: the runtime's buffer holds SERIALIZATION_BUFFER_SIZE bytes.
    let buf = unsafe { slice::from_raw_parts_mut(buffer.cast::<u8>(), SERIALIZATION_BUFFER_SIZE) };
    let written = scanner.serialize(buf);
    c_uint::try_from(written).unwrap_or(0)
}

/// Restore a snapshot. A snapshot that fails to decode resets the scanner.
#[no_mangle]
pub extern "C" fn tree_sitter_elm_external_scanner_deserialize(
    payload: *mut c_void,
    buffer: *const c_char,
    length: c_uint,
) {
    // SAFETY: `payload` came from `create`.
    let scanner = unsafe { &mut *payload.cast::<Scanner>() };
    let len = usize::try_from(length).unwrap_or(0);
    let bytes: &[u8] = if buffer.is_null() || len == 0 {
        &[]
    } else {
        // SAFETY: the runtime passes `length` readable bytes.
        unsafe { slice::from_raw_parts(buffer.cast::<u8>(), len) }
    };
    if let Err(err) = scanner.deserialize(bytes) {
        warn!(%err, "discarding unreadable scanner snapshot");
        scanner.state_mut().reset();
    }
}

/// One scan call; on success the token kind is stored in
/// `lexer.result_symbol`.
#[no_mangle]
pub extern "C" fn tree_sitter_elm_external_scanner_scan(
    payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    // SAFETY: `payload` came from `create`.
    let scanner = unsafe { &mut *payload.cast::<Scanner>() };
    // SAFETY: the runtime passes one flag per external token.
    let valid = ValidSymbols::from_slice(unsafe {
        slice::from_raw_parts(valid_symbols, TokenKind::COUNT)
    });

    let mut runtime_lexer = RuntimeLexer { raw: lexer };
    match scanner.scan(&mut runtime_lexer, valid) {
        Some(kind) => {
            // SAFETY: `lexer` is live for the scan call.
            unsafe { (*lexer).result_symbol = kind.symbol() };
            true
        }
        None => false,
    }
}
