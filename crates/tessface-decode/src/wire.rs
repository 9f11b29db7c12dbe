//! Wire edge loop decoding.

use tracing::warn;

use crate::cursor::IndexCursor;
use crate::error::{DecodeResult, FormatError};
use crate::flags::{WIRE_IS_CLOSING, WIRE_IS_NOT_DRAWN};

/// Polyline of one tessellated edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edge {
    /// Indices of the polyline points, in order.
    pub vertices: Vec<u32>,
    pub visible: bool,
}

/// Closed sequence of edges bounding part of a face.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loop {
    pub edges: Vec<Edge>,
}

/// Unpacked wire edge size entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSize {
    pub vertices: u32,
    pub closing: bool,
    pub hidden: bool,
}

impl EdgeSize {
    #[must_use]
    pub fn unpack(raw: u32) -> Self {
        Self {
            vertices: raw & !(WIRE_IS_CLOSING | WIRE_IS_NOT_DRAWN),
            closing: raw & WIRE_IS_CLOSING != 0,
            hidden: raw & WIRE_IS_NOT_DRAWN != 0,
        }
    }
}

/// Group the wire edges of one face into loops.
///
/// `sizes` holds one packed entry per edge; the edges' point indices are
/// read from `indices` starting at `start`. An unclosed tail fails with
/// [`FormatError::UnterminatedLoop`] unless `close_unterminated` is set, in
/// which case it becomes a final loop.
pub fn decode_loops(
    sizes: &[u32],
    indices: &[u32],
    start: usize,
    close_unterminated: bool,
) -> DecodeResult<Vec<Loop>> {
    let mut cursor = IndexCursor::wire(indices, start);
    let mut loops = Vec::new();
    let mut current = Loop::default();

    for &raw in sizes {
        let size = EdgeSize::unpack(raw);
        let vertices = cursor.take(size.vertices as usize)?.to_vec();
        current.edges.push(Edge {
            vertices,
            visible: !size.hidden,
        });
        if size.closing {
            loops.push(std::mem::take(&mut current));
        }
    }

    if !current.edges.is_empty() {
        if !close_unterminated {
            return Err(FormatError::UnterminatedLoop {
                edges: current.edges.len(),
            });
        }
        warn!(edges = current.edges.len(), "closing unterminated wire loop");
        loops.push(current);
    }
    Ok(loops)
}
