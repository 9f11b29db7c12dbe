//! Block classification.
//!
//! Turns the presence mask and the packed size list of a face into an
//! ordered worklist of blocks. Point counts are unpacked here, once, so the
//! primitive decoders never see the flag bits.

use tracing::{debug, trace};

use crate::error::{DecodeResult, FormatError};
use crate::flags::{NORMAL_MASK, NORMAL_SINGLE, NormalMode, Shape, UsedEntities, Variant};

/// Point count of one fan or strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointCount {
    /// Every point carries its own normal.
    PerVertexNormals(u32),
    /// The primitive carries one normal shared by all its points.
    SharedNormal(u32),
}

impl PointCount {
    /// Unpack a one-normal point count, stripping the flag bits.
    #[must_use]
    pub fn unpack(raw: u32) -> Self {
        let points = raw & NORMAL_MASK;
        if raw & NORMAL_SINGLE == 0 {
            Self::PerVertexNormals(points)
        } else {
            Self::SharedNormal(points)
        }
    }

    /// Number of points in the primitive.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::PerVertexNormals(n) | Self::SharedNormal(n) => n,
        }
    }

    #[must_use]
    pub fn shares_normal(self) -> bool {
        matches!(self, Self::SharedNormal(_))
    }

    /// Triangles produced by a fan or strip over this many points.
    #[must_use]
    pub fn triangle_count(self) -> usize {
        (self.points() as usize).saturating_sub(2)
    }
}

/// Declared sizes of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSizes {
    /// Number of independent triangles.
    Triangles(u32),
    /// Point count of every fan or strip in the block.
    Primitives(Vec<PointCount>),
}

impl BlockSizes {
    /// Number of triangles the block decodes to.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        match self {
            Self::Triangles(count) => *count as usize,
            Self::Primitives(counts) => counts.iter().map(|c| c.triangle_count()).sum(),
        }
    }
}

/// One entry of the decode worklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub variant: Variant,
    pub sizes: BlockSizes,
}

struct SizeReader<'a> {
    sizes: &'a [u32],
    index: usize,
}

impl SizeReader<'_> {
    fn next(&mut self, variant: Variant) -> DecodeResult<u32> {
        let value = self
            .sizes
            .get(self.index)
            .copied()
            .ok_or(FormatError::TruncatedSizes {
                variant,
                index: self.index,
            })?;
        self.index += 1;
        Ok(value)
    }

    fn remaining(&self) -> usize {
        self.sizes.len().saturating_sub(self.index)
    }
}

/// Build the ordered block worklist for one face.
///
/// Absent variants consume no size entries. A present variant whose entries
/// are missing fails with [`FormatError::TruncatedSizes`].
pub fn classify(mask: UsedEntities, sizes: &[u32]) -> DecodeResult<Vec<Block>> {
    if mask.unknown_bits() != 0 {
        trace!(bits = mask.unknown_bits(), "ignoring unknown entity bits");
    }

    let mut reader = SizeReader { sizes, index: 0 };
    let mut blocks = Vec::new();
    for variant in Variant::present_in(mask) {
        let sizes = match variant.shape() {
            Shape::Triangles => {
                let raw = reader.next(variant)?;
                let count = match variant.normals() {
                    NormalMode::PerVertex => raw,
                    NormalMode::OneNormal => raw & NORMAL_MASK,
                };
                BlockSizes::Triangles(count)
            }
            Shape::Fan | Shape::Strip => {
                let primitives = reader.next(variant)? as usize;
                let mut counts = Vec::with_capacity(primitives.min(reader.remaining()));
                for _ in 0..primitives {
                    let raw = reader.next(variant)?;
                    counts.push(match variant.normals() {
                        NormalMode::PerVertex => PointCount::PerVertexNormals(raw),
                        NormalMode::OneNormal => PointCount::unpack(raw),
                    });
                }
                BlockSizes::Primitives(counts)
            }
        };
        trace!(%variant, triangles = sizes.triangle_count(), "classified block");
        blocks.push(Block { variant, sizes });
    }

    if reader.remaining() > 0 {
        debug!(unused = reader.remaining(), "trailing size entries ignored");
    }
    Ok(blocks)
}
