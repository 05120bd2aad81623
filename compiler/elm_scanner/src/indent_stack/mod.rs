//! Stack of section start columns.

use smallvec::SmallVec;
use tracing::debug;

use crate::state::SERIALIZATION_BUFFER_SIZE;

/// Frames that fit in the snapshot buffer next to the other state fields:
/// runback count (1), runback bits (8), indent length (4), frame count (1),
/// then 4 bytes per frame.
pub const MAX_INDENT_FRAMES: usize = (SERIALIZATION_BUFFER_SIZE - 4 - 2 - 8) / 4;

const _: () = assert!(MAX_INDENT_FRAMES <= u8::MAX as usize);

/// Columns at which the currently open layout sections started.
///
/// The bottom frame is column 0 (the file itself) and is never popped. The
/// top is the innermost open section. Entries are not required to increase:
/// an `OpenSection` pushes whatever column the grammar opens it at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentStack {
    frames: SmallVec<[u32; 16]>,
}

impl IndentStack {
    pub fn new() -> Self {
        let mut frames = SmallVec::new();
        frames.push(0);
        Self { frames }
    }

    /// Rebuild from serialized frames. Callers validate the count and the
    /// bottom frame.
    pub(crate) fn from_frames(frames: &[u32]) -> Self {
        Self {
            frames: SmallVec::from_slice(frames),
        }
    }

    /// Column of the innermost open section.
    #[inline]
    pub fn top(&self) -> u32 {
        match self.frames.last() {
            Some(&column) => column,
            None => unreachable!("indentation stack lost its bottom frame"),
        }
    }

    /// Open a section at `column`.
    ///
    /// # Panics
    ///
    /// When the stack already holds [`MAX_INDENT_FRAMES`] frames.
    pub fn push(&mut self, column: u32) {
        assert!(
            self.frames.len() < MAX_INDENT_FRAMES,
            "indentation stack overflow: {MAX_INDENT_FRAMES} frames already open"
        );
        self.frames.push(column);
        debug!(column, depth = self.frames.len(), "open section");
    }

    /// Close the innermost section and return its column.
    ///
    /// # Panics
    ///
    /// When only the bottom frame is left.
    pub fn pop(&mut self) -> u32 {
        assert!(
            self.frames.len() > 1,
            "indentation stack underflow: the bottom frame is never popped"
        );
        let column = self.top();
        self.frames.pop();
        debug!(column, depth = self.frames.len(), "close section");
        column
    }

    /// Number of frames, bottom included.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from bottom to top.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.frames
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}
