//! Triangle, fan and strip decoders.
//!
//! Every decoder has the same shape: it reads one block from the shared
//! cursor and returns the block's triangles. Corners borrow their texture
//! indices straight from the index buffer.
//!
//! # Point layout
//!
//! A point with its own normal is `normal, texture[channels], vertex`. A
//! primitive that shares its normal starts with one `normal, texture[channels]`
//! record followed by one vertex index per point; the record is broadcast to
//! every corner.

use tracing::trace;

use crate::classify::{BlockSizes, PointCount};
use crate::cursor::IndexCursor;
use crate::error::DecodeResult;
use crate::flags::Variant;

/// One triangle corner: normal, texture and vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner<'a> {
    pub normal: u32,
    /// One texture coordinate index per channel, empty when untextured.
    pub textures: &'a [u32],
    pub vertex: u32,
}

/// Three corners in winding order.
pub type Triangle<'a> = [Corner<'a>; 3];

/// Uniform decoder signature used by the dispatch table.
pub type PrimitiveDecoder =
    for<'a> fn(&mut IndexCursor<'a>, &BlockSizes, usize) -> DecodeResult<Vec<Triangle<'a>>>;

/// Decoder for every variant, indexed by canonical order.
///
/// Textured variants reuse the untextured decoders; the caller passes the
/// face's channel count for them and zero otherwise.
pub const DISPATCH: [PrimitiveDecoder; 12] = [
    decode_triangles,
    decode_fans,
    decode_strips,
    decode_one_normal_triangles,
    decode_fans,
    decode_strips,
    decode_triangles,
    decode_fans,
    decode_strips,
    decode_one_normal_triangles,
    decode_fans,
    decode_strips,
];

/// Look up the decoder for `variant`.
#[must_use]
pub fn decoder_for(variant: Variant) -> PrimitiveDecoder {
    DISPATCH[variant as usize]
}

/// Indices occupied by one point that carries its own normal.
fn point_stride(channels: usize) -> usize {
    channels.saturating_add(2)
}

/// Read the point at the start of `data`.
fn point(data: &[u32], channels: usize) -> Corner<'_> {
    Corner {
        normal: data[0],
        textures: &data[1..=channels],
        vertex: data[channels + 1],
    }
}

/// Corner for `vertex` that takes its normal and textures from `attribute`.
fn shared(attribute: &[u32], vertex: u32) -> Corner<'_> {
    Corner {
        normal: attribute[0],
        textures: &attribute[1..],
        vertex,
    }
}

/// Read the points of one fan or strip.
fn read_points<'a>(
    cursor: &mut IndexCursor<'a>,
    count: PointCount,
    channels: usize,
) -> DecodeResult<Vec<Corner<'a>>> {
    let points = count.points() as usize;
    match count {
        PointCount::PerVertexNormals(_) => {
            let data = cursor.take(points.saturating_mul(point_stride(channels)))?;
            Ok(data
                .chunks_exact(point_stride(channels))
                .map(|p| point(p, channels))
                .collect())
        }
        PointCount::SharedNormal(_) => {
            let data = cursor.take(channels.saturating_add(1).saturating_add(points))?;
            let (attribute, vertices) = data.split_at(1 + channels);
            Ok(vertices.iter().map(|&v| shared(attribute, v)).collect())
        }
    }
}

fn capacity(sizes: &BlockSizes, cursor: &IndexCursor<'_>) -> usize {
    sizes.triangle_count().min(cursor.remaining())
}

fn primitive_counts(sizes: &BlockSizes) -> &[PointCount] {
    match sizes {
        BlockSizes::Primitives(counts) => counts,
        BlockSizes::Triangles(_) => &[],
    }
}

fn triangle_count(sizes: &BlockSizes) -> usize {
    match sizes {
        BlockSizes::Triangles(count) => *count as usize,
        BlockSizes::Primitives(_) => 0,
    }
}

/// Independent triangles, three points each with their own normal.
pub fn decode_triangles<'a>(
    cursor: &mut IndexCursor<'a>,
    sizes: &BlockSizes,
    channels: usize,
) -> DecodeResult<Vec<Triangle<'a>>> {
    let stride = point_stride(channels);
    let triangle_stride = stride.saturating_mul(3);
    let data = cursor.take(triangle_count(sizes).saturating_mul(triangle_stride))?;
    Ok(data
        .chunks_exact(triangle_stride)
        .map(|t| {
            [
                point(t, channels),
                point(&t[stride..], channels),
                point(&t[2 * stride..], channels),
            ]
        })
        .collect())
}

/// Independent triangles that each carry one normal and three vertices.
pub fn decode_one_normal_triangles<'a>(
    cursor: &mut IndexCursor<'a>,
    sizes: &BlockSizes,
    channels: usize,
) -> DecodeResult<Vec<Triangle<'a>>> {
    let stride = channels.saturating_add(4);
    let data = cursor.take(triangle_count(sizes).saturating_mul(stride))?;
    Ok(data
        .chunks_exact(stride)
        .map(|t| {
            let (attribute, v) = t.split_at(1 + channels);
            [
                shared(attribute, v[0]),
                shared(attribute, v[1]),
                shared(attribute, v[2]),
            ]
        })
        .collect())
}

/// Fans: triangle `k` is `(root, point[k], point[k + 1])`.
pub fn decode_fans<'a>(
    cursor: &mut IndexCursor<'a>,
    sizes: &BlockSizes,
    channels: usize,
) -> DecodeResult<Vec<Triangle<'a>>> {
    let mut triangles = Vec::with_capacity(capacity(sizes, cursor));
    for &count in primitive_counts(sizes) {
        let points = read_points(cursor, count, channels)?;
        let Some((root, ring)) = points.split_first() else {
            continue;
        };
        if ring.len() < 2 {
            trace!(points = points.len(), "degenerate fan");
        }
        triangles.extend(ring.windows(2).map(|edge| [*root, edge[0], edge[1]]));
    }
    Ok(triangles)
}

/// Strips: consecutive triangles over a sliding window of three points,
/// with the first two corners swapped on every other triangle so adjacent
/// triangles keep the same orientation.
pub fn decode_strips<'a>(
    cursor: &mut IndexCursor<'a>,
    sizes: &BlockSizes,
    channels: usize,
) -> DecodeResult<Vec<Triangle<'a>>> {
    let mut triangles = Vec::with_capacity(capacity(sizes, cursor));
    for &count in primitive_counts(sizes) {
        let points = read_points(cursor, count, channels)?;
        if points.len() < 3 {
            trace!(points = points.len(), "degenerate strip");
        }
        triangles.extend(points.windows(3).enumerate().map(|(t, w)| {
            if t % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            }
        }));
    }
    Ok(triangles)
}
