//! Queue of virtual tokens still owed to the engine at one position.
//!
//! One indentation decision can require several tokens (closing two
//! sections and ending a declaration), but the engine takes one token per
//! call. The extra tokens wait here and are replayed, zero-width, on the
//! following calls.

use tracing::debug;

use crate::TokenKind;

/// Maximum number of pending tokens (one bit each in a `u64`).
pub const RUNBACK_CAPACITY: u8 = 64;

/// Pending [`TokenKind::EndDecl`] / [`TokenKind::EndSection`] markers.
///
/// Bit layout: a set bit is `EndSection`, a clear bit is `EndDecl`. New
/// entries enter at bit 0 and shift older entries up, so the entry served
/// next sits at bit `count - 1`: tokens come out in the order they were
/// decided. Bits at or above `count` are always zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Runback {
    bits: u64,
    count: u8,
}

impl Runback {
    pub const fn new() -> Self {
        Self { bits: 0, count: 0 }
    }

    /// Rebuild from serialized fields, dropping bits past `count`.
    pub(crate) fn from_raw(bits: u64, count: u8) -> Self {
        debug_assert!(count <= RUNBACK_CAPACITY);
        Self {
            bits: bits & mask(count),
            count,
        }
    }

    /// Queue `kind` behind every token already pending.
    ///
    /// # Panics
    ///
    /// When the queue is full, or `kind` is not a layout terminator.
    pub fn push(&mut self, kind: TokenKind) {
        assert!(
            self.count < RUNBACK_CAPACITY,
            "runback overflow: {RUNBACK_CAPACITY} tokens already pending"
        );
        let bit = match kind {
            TokenKind::EndSection => 1,
            TokenKind::EndDecl => 0,
            other => panic!("{other} cannot be queued for runback"),
        };
        self.bits = (self.bits << 1) | bit;
        self.count += 1;
        debug!(%kind, pending = self.count, "queue runback");
    }

    /// Token that the next replay will emit.
    ///
    /// # Panics
    ///
    /// When the queue is empty.
    pub fn peek(&self) -> TokenKind {
        assert!(self.count > 0, "runback read while empty");
        if (self.bits >> (self.count - 1)) & 1 == 1 {
            TokenKind::EndSection
        } else {
            TokenKind::EndDecl
        }
    }

    /// Remove and return the next token.
    ///
    /// # Panics
    ///
    /// When the queue is empty.
    pub fn pop(&mut self) -> TokenKind {
        let kind = self.peek();
        self.count -= 1;
        self.bits &= mask(self.count);
        kind
    }

    pub fn clear(&mut self) {
        self.bits = 0;
        self.count = 0;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn len(&self) -> u8 {
        self.count
    }

    /// Raw bitfield, as serialized.
    #[inline]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Pending tokens in replay order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        let mut copy = *self;
        std::iter::from_fn(move || (!copy.is_empty()).then(|| copy.pop()))
    }
}

/// Mask covering the low `count` bits.
fn mask(count: u8) -> u64 {
    if count >= RUNBACK_CAPACITY {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}
