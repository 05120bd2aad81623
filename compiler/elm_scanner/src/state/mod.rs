//! Persisted scanner state and its snapshot encoding.
//!
//! # Snapshot layout
//!
//! All integers little-endian, fields in this order:
//!
//! ```text
//! offset  size   field
//! 0       1      runback count
//! 1       8      runback bits
//! 9       4      indent length
//! 13      1      indentation frame count
//! 14      4 * n  indentation frames, bottom first
//! ```
//!
//! An empty snapshot means "fresh state".

use thiserror::Error;
use tracing::trace;

use crate::indent_stack::{IndentStack, MAX_INDENT_FRAMES};
use crate::runback::{Runback, RUNBACK_CAPACITY};

/// Size of the snapshot buffer the tree-sitter runtime hands to `serialize`.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Bytes before the first indentation frame.
const HEADER_LEN: usize = 1 + 8 + 4 + 1;

const _: () = assert!(HEADER_LEN + 4 * MAX_INDENT_FRAMES <= SERIALIZATION_BUFFER_SIZE);

/// Why a snapshot could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("snapshot truncated: needed {needed} bytes, got {found}")]
    Truncated { needed: usize, found: usize },
    #[error("snapshot has {extra} trailing bytes after the indentation frames")]
    TrailingBytes { extra: usize },
    #[error("snapshot declares {count} pending runback tokens, capacity is {}", RUNBACK_CAPACITY)]
    RunbackOverflow { count: u8 },
    #[error("snapshot declares {count} indentation frames, capacity is {}", MAX_INDENT_FRAMES)]
    TooManyFrames { count: usize },
    #[error("snapshot has an empty indentation stack")]
    MissingBottomFrame,
    #[error("snapshot bottom indentation frame is column {column}, expected 0")]
    BottomFrameNotZero { column: u32 },
}

/// Everything the scanner remembers between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScannerState {
    /// Column of the first non-space character on the last line a scan
    /// crossed into.
    pub(crate) indent_length: u32,
    pub(crate) indents: IndentStack,
    pub(crate) runback: Runback,
}

impl ScannerState {
    /// Fresh state: indent length 0, no pending tokens, stack `[0]`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn indent_length(&self) -> u32 {
        self.indent_length
    }

    pub fn set_indent_length(&mut self, column: u32) {
        self.indent_length = column;
    }

    #[inline]
    pub fn indents(&self) -> &IndentStack {
        &self.indents
    }

    pub fn indents_mut(&mut self) -> &mut IndentStack {
        &mut self.indents
    }

    #[inline]
    pub fn runback(&self) -> &Runback {
        &self.runback
    }

    pub fn runback_mut(&mut self) -> &mut Runback {
        &mut self.runback
    }

    /// Bytes [`serialize`](Self::serialize) will write.
    pub fn serialized_len(&self) -> usize {
        HEADER_LEN + 4 * self.indents.len()
    }

    /// Write the snapshot into `buf` and return the number of bytes written.
    ///
    /// # Panics
    ///
    /// When `buf` is shorter than [`serialized_len`](Self::serialized_len);
    /// a buffer of [`SERIALIZATION_BUFFER_SIZE`] always suffices.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        let len = self.serialized_len();
        assert!(
            buf.len() >= len,
            "snapshot buffer too small: {} < {len}",
            buf.len()
        );

        buf[0] = self.runback.len();
        buf[1..9].copy_from_slice(&self.runback.bits().to_le_bytes());
        buf[9..13].copy_from_slice(&self.indent_length.to_le_bytes());
        buf[13] = u8::try_from(self.indents.len()).unwrap_or(u8::MAX);
        for (slot, column) in buf[HEADER_LEN..len]
            .chunks_exact_mut(4)
            .zip(self.indents.as_slice())
        {
            slot.copy_from_slice(&column.to_le_bytes());
        }

        trace!(bytes = len, "serialize scanner state");
        len
    }

    /// Owned snapshot.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0; self.serialized_len()];
        self.serialize(&mut buf);
        buf
    }

    /// Decode a snapshot produced by [`serialize`](Self::serialize).
    ///
    /// An empty slice yields the fresh state.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, StateError> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        if bytes.len() < HEADER_LEN {
            return Err(StateError::Truncated {
                needed: HEADER_LEN,
                found: bytes.len(),
            });
        }

        let runback_count = bytes[0];
        if runback_count > RUNBACK_CAPACITY {
            return Err(StateError::RunbackOverflow {
                count: runback_count,
            });
        }
        let runback_bits = u64::from_le_bytes(le_array(&bytes[1..9]));
        let indent_length = u32::from_le_bytes(le_array(&bytes[9..13]));

        let frame_count = usize::from(bytes[13]);
        if frame_count == 0 {
            return Err(StateError::MissingBottomFrame);
        }
        if frame_count > MAX_INDENT_FRAMES {
            return Err(StateError::TooManyFrames { count: frame_count });
        }
        let needed = HEADER_LEN + 4 * frame_count;
        if bytes.len() < needed {
            return Err(StateError::Truncated {
                needed,
                found: bytes.len(),
            });
        }
        if bytes.len() > needed {
            return Err(StateError::TrailingBytes {
                extra: bytes.len() - needed,
            });
        }

        let frames: Vec<u32> = bytes[HEADER_LEN..needed]
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes(le_array(chunk)))
            .collect();
        if frames[0] != 0 {
            return Err(StateError::BottomFrameNotZero { column: frames[0] });
        }

        trace!(bytes = bytes.len(), frames = frame_count, "deserialize scanner state");
        Ok(Self {
            indent_length,
            indents: IndentStack::from_frames(&frames),
            runback: Runback::from_raw(runback_bits, runback_count),
        })
    }

    /// Replace `self` with a decoded snapshot. On error `self` is unchanged.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        *self = Self::deserialize(bytes)?;
        Ok(())
    }
}

/// Copy a length-checked slice into a fixed array.
fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut array = [0; N];
    array.copy_from_slice(bytes);
    array
}
