//! Decode packed face tessellation into triangle lists and edge loops.
//!
//! CAD exchange tessellations store each face as a set of blocks in up to
//! twelve encodings (triangles, fans and strips; per-vertex or shared
//! normals; with or without texture indices) read from one flat index
//! buffer, plus a separate stream of wire edges. This crate turns one face
//! into a uniform triangle list of vertex/normal/texture index triples and a
//! list of closed edge loops.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **Pure**: A face decodes the same way every time and shares no state,
//!   so callers may decode faces in parallel
//! - **Index relay**: Indices are copied through, never dereferenced
//!
//! # Key functions
//!
//! - [`decode`]: Decode one face with strict defaults
//! - [`decode_with`]: Decode one face with explicit [`DecodeOptions`]
//! - [`classify`]: Build the ordered block worklist of a face
//! - [`decode_loops`]: Group wire edges into loops

mod error;

pub mod classify;
pub mod cursor;
pub mod flags;
pub mod mesh;
pub mod options;
pub mod primitives;
pub mod wire;

pub use classify::{Block, BlockSizes, PointCount, classify};
pub use cursor::IndexCursor;
pub use error::{DecodeResult, FormatError, Stream};
pub use flags::{UsedEntities, Variant};
pub use mesh::{DecodedMesh, FaceTessellationDescriptor, NO_TEXTURE, decode, decode_with};
pub use options::DecodeOptions;
pub use primitives::{Corner, Triangle, decoder_for};
pub use wire::{Edge, Loop, decode_loops};
