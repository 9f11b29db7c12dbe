//! Presence bits, variant tags and packed-count flags.

use std::fmt;

bitflags::bitflags! {
    /// Presence mask of the triangle encodings used by one face.
    ///
    /// Bits are laid out in the canonical decode order. Bits outside the
    /// twelve known encodings are retained but never decoded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UsedEntities: u16 {
        /// Plain triangles, one normal per vertex.
        const TRIANGLE = 1 << 0;
        /// Triangle fans, one normal per vertex.
        const TRIANGLE_FAN = 1 << 1;
        /// Triangle strips, one normal per vertex.
        const TRIANGLE_STRIP = 1 << 2;
        /// Triangles with a single normal each.
        const TRIANGLE_ONE_NORMAL = 1 << 3;
        /// Fans that may share one normal.
        const TRIANGLE_FAN_ONE_NORMAL = 1 << 4;
        /// Strips that may share one normal.
        const TRIANGLE_STRIP_ONE_NORMAL = 1 << 5;
        /// Textured triangles.
        const TRIANGLE_TEXTURED = 1 << 6;
        /// Textured fans.
        const TRIANGLE_FAN_TEXTURED = 1 << 7;
        /// Textured strips.
        const TRIANGLE_STRIP_TEXTURED = 1 << 8;
        /// Textured triangles with a single normal each.
        const TRIANGLE_ONE_NORMAL_TEXTURED = 1 << 9;
        /// Textured fans that may share one normal.
        const TRIANGLE_FAN_ONE_NORMAL_TEXTURED = 1 << 10;
        /// Textured strips that may share one normal.
        const TRIANGLE_STRIP_ONE_NORMAL_TEXTURED = 1 << 11;
    }
}

impl UsedEntities {
    /// Bits set in the mask that name no known encoding.
    #[must_use]
    pub fn unknown_bits(self) -> u16 {
        self.bits() & !Self::all().bits()
    }
}

/// Set on a one-normal fan/strip point count when the primitive carries a
/// single shared normal.
pub const NORMAL_SINGLE: u32 = 0x4000_0000;

/// Mask that strips the flag bits from a packed point count.
pub const NORMAL_MASK: u32 = 0x3FFF_FFFF;

/// Set on a wire edge size when the edge closes the current loop.
pub const WIRE_IS_CLOSING: u32 = 0x8000;

/// Set on a wire edge size when the edge is not drawn.
pub const WIRE_IS_NOT_DRAWN: u32 = 0x4000;

/// Primitive shape of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Triangles,
    Fan,
    Strip,
}

/// How normals are stored in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalMode {
    /// Every point carries its own normal.
    PerVertex,
    /// The block may share one normal per primitive.
    OneNormal,
}

/// One of the twelve triangle encodings, in canonical decode order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Triangles,
    Fans,
    Strips,
    OneNormalTriangles,
    OneNormalFans,
    OneNormalStrips,
    TexturedTriangles,
    TexturedFans,
    TexturedStrips,
    OneNormalTexturedTriangles,
    OneNormalTexturedFans,
    OneNormalTexturedStrips,
}

impl Variant {
    /// All variants in the order their blocks appear in the size list.
    pub const CANONICAL_ORDER: [Self; 12] = [
        Self::Triangles,
        Self::Fans,
        Self::Strips,
        Self::OneNormalTriangles,
        Self::OneNormalFans,
        Self::OneNormalStrips,
        Self::TexturedTriangles,
        Self::TexturedFans,
        Self::TexturedStrips,
        Self::OneNormalTexturedTriangles,
        Self::OneNormalTexturedFans,
        Self::OneNormalTexturedStrips,
    ];

    /// Presence bit of this variant.
    #[must_use]
    pub fn flag(self) -> UsedEntities {
        UsedEntities::from_bits_retain(1 << self as u16)
    }

    #[must_use]
    pub fn shape(self) -> Shape {
        match self {
            Self::Triangles
            | Self::OneNormalTriangles
            | Self::TexturedTriangles
            | Self::OneNormalTexturedTriangles => Shape::Triangles,
            Self::Fans | Self::OneNormalFans | Self::TexturedFans | Self::OneNormalTexturedFans => {
                Shape::Fan
            }
            Self::Strips
            | Self::OneNormalStrips
            | Self::TexturedStrips
            | Self::OneNormalTexturedStrips => Shape::Strip,
        }
    }

    #[must_use]
    pub fn normals(self) -> NormalMode {
        match self {
            Self::OneNormalTriangles
            | Self::OneNormalFans
            | Self::OneNormalStrips
            | Self::OneNormalTexturedTriangles
            | Self::OneNormalTexturedFans
            | Self::OneNormalTexturedStrips => NormalMode::OneNormal,
            _ => NormalMode::PerVertex,
        }
    }

    #[must_use]
    pub fn is_textured(self) -> bool {
        matches!(
            self,
            Self::TexturedTriangles
                | Self::TexturedFans
                | Self::TexturedStrips
                | Self::OneNormalTexturedTriangles
                | Self::OneNormalTexturedFans
                | Self::OneNormalTexturedStrips
        )
    }

    /// Variants present in `mask`, in canonical order.
    pub fn present_in(mask: UsedEntities) -> impl Iterator<Item = Self> {
        Self::CANONICAL_ORDER
            .into_iter()
            .filter(move |variant| mask.contains(variant.flag()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Triangles => "triangle",
            Self::Fans => "fan",
            Self::Strips => "strip",
            Self::OneNormalTriangles => "one-normal triangle",
            Self::OneNormalFans => "one-normal fan",
            Self::OneNormalStrips => "one-normal strip",
            Self::TexturedTriangles => "textured triangle",
            Self::TexturedFans => "textured fan",
            Self::TexturedStrips => "textured strip",
            Self::OneNormalTexturedTriangles => "one-normal textured triangle",
            Self::OneNormalTexturedFans => "one-normal textured fan",
            Self::OneNormalTexturedStrips => "one-normal textured strip",
        };
        f.write_str(name)
    }
}
