//! Byte cursor over a sentinel-terminated buffer.
//!
//! EOF is the sentinel (`0x00`) at or past the source length. A null byte
//! before that point is an interior null: [`Cursor::current_char`] still
//! reports it as `'\0'`, but [`Cursor::is_eof`] stays false.

/// Cursor over a [`SourceBuffer`](crate::SourceBuffer).
///
/// The cursor is [`Copy`], so a host can snapshot and rewind it freely.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

impl<'a> Cursor<'a> {
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00`, as guaranteed by `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Decode the character at the current position.
    ///
    /// Returns `'\0'` at EOF.
    pub fn current_char(&self) -> char {
        if self.is_eof() {
            return '\0';
        }
        let width = Self::utf8_char_width(self.current());
        let end = (self.pos + width).min(self.source_len);
        std::str::from_utf8(&self.buf[self.pos as usize..end as usize])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Advance past one full UTF-8 character. No-op at EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        if !self.is_eof() {
            let width = Self::utf8_char_width(self.current());
            self.pos = (self.pos + width).min(self.source_len);
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Move to an absolute byte offset, clamped to the source length.
    ///
    /// The offset must sit on a character boundary; hosts only ever restore
    /// offsets they obtained from this cursor.
    pub fn seek(&mut self, pos: u32) {
        self.pos = pos.min(self.source_len);
    }

    /// Source text between two byte offsets.
    ///
    /// Returns an empty string when the range does not fall on character
    /// boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        let end = end.min(self.source_len);
        std::str::from_utf8(&self.buf[start.min(end) as usize..end as usize]).unwrap_or_default()
    }

    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Offset of the first byte of the line containing the current position.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "newline offset < pos, which fits in u32"
    )]
    pub fn line_start(&self) -> u32 {
        let before = &self.buf[..self.pos as usize];
        match memchr::memrchr(b'\n', before) {
            Some(newline) => newline as u32 + 1,
            None => 0,
        }
    }

    /// Number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance to the next `\n` byte or EOF.
    ///
    /// Line comments are skipped with this: their bodies never influence
    /// layout, so a `memchr` jump replaces the per-character loop.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }
}

#[cfg(test)]
mod tests;
