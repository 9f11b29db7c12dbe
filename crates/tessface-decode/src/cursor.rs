//! Shared read position over a flat index buffer.

use crate::error::{DecodeResult, FormatError, Stream};

/// Forward-only cursor over a flat `u32` index buffer.
///
/// All triangle decoders of one face share a single cursor; each decoded
/// primitive advances it by exactly the number of indices it consumed.
#[derive(Debug, Clone)]
pub struct IndexCursor<'a> {
    buffer: &'a [u32],
    offset: usize,
    stream: Stream,
}

impl<'a> IndexCursor<'a> {
    /// Cursor over the triangulated index buffer, starting at `offset`.
    #[must_use]
    pub fn triangulated(buffer: &'a [u32], offset: usize) -> Self {
        Self::new(buffer, offset, Stream::Triangulated)
    }

    /// Cursor over the wire index buffer, starting at `offset`.
    #[must_use]
    pub fn wire(buffer: &'a [u32], offset: usize) -> Self {
        Self::new(buffer, offset, Stream::Wire)
    }

    fn new(buffer: &'a [u32], offset: usize, stream: Stream) -> Self {
        Self {
            buffer,
            offset,
            stream,
        }
    }

    /// Current offset into the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of indices left after the current offset.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    /// Read `count` consecutive indices and advance past them.
    ///
    /// On failure the cursor is left where it was.
    pub fn take(&mut self, count: usize) -> DecodeResult<&'a [u32]> {
        let end = self
            .offset
            .checked_add(count)
            .filter(|&end| end <= self.buffer.len())
            .ok_or(FormatError::TruncatedBuffer {
                stream: self.stream,
                offset: self.offset,
                needed: count,
                len: self.buffer.len(),
            })?;
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    /// Read a single index.
    pub fn next_index(&mut self) -> DecodeResult<u32> {
        Ok(self.take(1)?[0])
    }
}
