//! Face decoding entry points and the decoded mesh.

use tracing::{debug, trace};

use crate::classify::{Block, classify};
use crate::cursor::IndexCursor;
use crate::error::{DecodeResult, FormatError};
use crate::flags::UsedEntities;
use crate::options::DecodeOptions;
use crate::primitives::{Corner, Triangle, decoder_for};
use crate::wire::{Loop, decode_loops};

/// Texture index recorded for corners of untextured blocks in a face that
/// also has textured blocks.
pub const NO_TEXTURE: u32 = u32::MAX;

/// Packed tessellation of one face, borrowed from its owner.
///
/// The index buffers are usually shared by every face of a tessellation;
/// the start offsets locate this face's data inside them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceTessellationDescriptor<'a> {
    /// Which encodings are present.
    pub used_entities: UsedEntities,
    /// Packed block sizes for the present encodings, in canonical order.
    pub triangulated_sizes: &'a [u32],
    /// Texture indices stored per textured point.
    pub texture_channels: u32,
    pub triangulated_indices: &'a [u32],
    pub triangulated_start: usize,
    /// Packed wire edge sizes, one per edge.
    pub wire_sizes: &'a [u32],
    pub wire_indices: &'a [u32],
    pub wire_start: usize,
}

/// Triangle list and edge loops of one face.
///
/// `vertices`, `normals` and `textures` are co-indexed: entry `i` of each
/// belongs to corner `i`, and every three corners form a triangle. When the
/// face decoded at least one textured corner, `textures` holds
/// `texture_channels()` entries per corner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedMesh {
    vertices: Vec<u32>,
    normals: Vec<u32>,
    textures: Vec<u32>,
    texture_channels: usize,
    loops: Vec<Loop>,
}

impl DecodedMesh {
    /// Vertex index of every corner.
    #[must_use]
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// Normal index of every corner.
    #[must_use]
    pub fn normals(&self) -> &[u32] {
        &self.normals
    }

    /// Texture indices, `texture_channels()` per corner, or empty.
    #[must_use]
    pub fn textures(&self) -> &[u32] {
        &self.textures
    }

    /// Texture indices stored per corner, zero when no textured corner was
    /// decoded.
    #[must_use]
    pub fn texture_channels(&self) -> usize {
        self.texture_channels
    }

    #[must_use]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the triangles, corners in winding order.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle<'_>> {
        (0..self.triangle_count()).map(|t| std::array::from_fn(|c| self.corner(3 * t + c)))
    }

    fn corner(&self, index: usize) -> Corner<'_> {
        let channels = self.texture_channels;
        Corner {
            normal: self.normals[index],
            textures: &self.textures[index * channels..(index + 1) * channels],
            vertex: self.vertices[index],
        }
    }

    /// Split into `(vertices, normals, textures, texture_channels, loops)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u32>, Vec<u32>, Vec<u32>, usize, Vec<Loop>) {
        (
            self.vertices,
            self.normals,
            self.textures,
            self.texture_channels,
            self.loops,
        )
    }
}

/// Accumulates corners block by block.
///
/// Texture storage starts with the first textured corner. Untextured
/// corners decoded before it are backfilled with [`NO_TEXTURE`], so padding
/// never exceeds what the index buffer could actually describe.
#[derive(Default)]
struct MeshBuilder {
    mesh: DecodedMesh,
}

impl MeshBuilder {
    fn extend(&mut self, triangles: &[Triangle<'_>]) {
        for corner in triangles.iter().flatten() {
            if self.mesh.texture_channels == 0 && !corner.textures.is_empty() {
                let channels = corner.textures.len();
                self.mesh.texture_channels = channels;
                self.mesh
                    .textures
                    .resize(self.mesh.vertices.len() * channels, NO_TEXTURE);
            }
            self.mesh.vertices.push(corner.vertex);
            self.mesh.normals.push(corner.normal);

            let channels = self.mesh.texture_channels;
            if corner.textures.len() == channels {
                self.mesh.textures.extend_from_slice(corner.textures);
            } else {
                self.mesh
                    .textures
                    .extend(std::iter::repeat_n(NO_TEXTURE, channels));
            }
        }
    }

    fn finish(mut self, loops: Vec<Loop>) -> DecodedMesh {
        self.mesh.loops = loops;
        self.mesh
    }
}

/// Channel count used by the textured blocks of a face, zero when it has
/// none.
fn texture_channels(
    blocks: &[Block],
    declared: u32,
    options: &DecodeOptions,
) -> DecodeResult<usize> {
    let Some(textured) = blocks.iter().find(|b| b.variant.is_textured()) else {
        return Ok(0);
    };
    let expected = options.expected_texture_channels;
    if declared == 0 || expected.is_some_and(|n| n != declared) {
        return Err(FormatError::InconsistentChannelCount {
            variant: textured.variant,
            declared,
            expected: expected.filter(|&n| n > 0),
        });
    }
    Ok(declared as usize)
}

/// Decode one face with the default options.
pub fn decode(descriptor: &FaceTessellationDescriptor<'_>) -> DecodeResult<DecodedMesh> {
    decode_with(descriptor, &DecodeOptions::default())
}

/// Decode one face.
///
/// Blocks are decoded in canonical order from one shared cursor, then the
/// wire loops are decoded from their own stream. Any error aborts the whole
/// face.
pub fn decode_with(
    descriptor: &FaceTessellationDescriptor<'_>,
    options: &DecodeOptions,
) -> DecodeResult<DecodedMesh> {
    let blocks = classify(descriptor.used_entities, descriptor.triangulated_sizes)?;
    let channels = texture_channels(&blocks, descriptor.texture_channels, options)?;

    let mut cursor = IndexCursor::triangulated(
        descriptor.triangulated_indices,
        descriptor.triangulated_start,
    );
    let mut builder = MeshBuilder::default();
    for block in &blocks {
        let block_channels = if block.variant.is_textured() { channels } else { 0 };
        let start = cursor.offset();
        let triangles = decoder_for(block.variant)(&mut cursor, &block.sizes, block_channels)?;
        trace!(
            variant = %block.variant,
            triangles = triangles.len(),
            consumed = cursor.offset() - start,
            "decoded block"
        );
        builder.extend(&triangles);
    }

    let loops = decode_loops(
        descriptor.wire_sizes,
        descriptor.wire_indices,
        descriptor.wire_start,
        options.close_unterminated_loops,
    )?;
    let mesh = builder.finish(loops);
    debug!(
        blocks = blocks.len(),
        triangles = mesh.triangle_count(),
        loops = mesh.loops().len(),
        "decoded face"
    );
    Ok(mesh)
}
