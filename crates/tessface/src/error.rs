//! Error types for tessellation access.

use tessface_decode::FormatError;
use thiserror::Error;

/// Result type for tessellation access.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a tessellation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Requested face does not exist.
    #[error("face {index} out of range, tessellation has {count} face(s)")]
    FaceOutOfRange {
        /// Requested face index.
        index: usize,
        /// Number of faces in the tessellation.
        count: usize,
    },

    /// A face's packed data is malformed.
    #[error("face {index}: {source}")]
    Format {
        /// Index of the face that failed to decode.
        index: usize,
        #[source]
        source: FormatError,
    },

    /// A decoded index points past a coordinate array.
    #[error("{array} index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Which coordinate array was read.
        array: &'static str,
        index: u32,
        len: usize,
    },
}
