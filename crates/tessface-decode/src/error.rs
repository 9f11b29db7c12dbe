//! Error types for tessellation decoding.

use std::fmt;

use thiserror::Error;

use crate::flags::Variant;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, FormatError>;

/// Which flat index stream a read ran past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// The triangulated index buffer.
    Triangulated,
    /// The wire (edge loop) index buffer.
    Wire,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangulated => f.write_str("triangulated"),
            Self::Wire => f.write_str("wire"),
        }
    }
}

/// Errors raised while decoding one face.
///
/// Every variant is fatal for the face being decoded: no partial mesh is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A block declares more indices than remain in an index buffer.
    #[error(
        "{stream} index buffer truncated: needed {needed} indices at offset {offset}, buffer holds {len}"
    )]
    TruncatedBuffer {
        /// Buffer that ran out.
        stream: Stream,
        /// Cursor offset at which the read started.
        offset: usize,
        /// Number of indices the read required.
        needed: usize,
        /// Total length of the buffer.
        len: usize,
    },

    /// The presence mask names a variant whose size entries are missing.
    #[error("size list truncated: {variant} block needs entry {index}")]
    TruncatedSizes {
        /// Variant whose sizes could not be read.
        variant: Variant,
        /// Index into the size list that was out of range.
        index: usize,
    },

    /// The wire edge stream ended in the middle of a loop.
    #[error("wire stream ends with an unclosed loop of {edges} edge(s)")]
    UnterminatedLoop {
        /// Number of edges in the dangling loop.
        edges: usize,
    },

    /// A textured block cannot be decoded with the declared channel count.
    #[error(
        "{variant} block declares {declared} texture channel(s), expected {}",
        expected_channels(.expected)
    )]
    InconsistentChannelCount {
        /// Textured variant being decoded.
        variant: Variant,
        /// Channel count declared by the face.
        declared: u32,
        /// Channel count required by the caller, `None` when any non-zero
        /// count would have been accepted.
        expected: Option<u32>,
    },
}

#[allow(clippy::ref_option)]
fn expected_channels(expected: &Option<u32>) -> String {
    expected.map_or_else(|| "at least one".to_owned(), |n| n.to_string())
}
