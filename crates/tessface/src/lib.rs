//! Per-face index meshes and edge loops of tessellated CAD bodies.
//!
//! A tessellated body carries flat coordinate arrays, one packed record per
//! face and two shared index buffers. This crate exposes that data through
//! [`TessellationSource`], decodes faces with [`tessface_decode`] and
//! resolves decoded indices back to coordinates.
//!
//! # Example
//!
//! ```
//! use tessface::{FaceTessellation, Tessellation, index_mesh_for_face};
//! use tessface::decode::{DecodeOptions, UsedEntities};
//!
//! let face = FaceTessellation {
//!     used_entities: UsedEntities::TRIANGLE,
//!     triangulated_sizes: vec![1],
//!     ..FaceTessellation::default()
//! };
//! let tess = Tessellation::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
//!     .with_faces(vec![face], vec![0, 0, 0, 3, 0, 6], Vec::new());
//!
//! let mesh = index_mesh_for_face(&tess, 0, &DecodeOptions::default()).unwrap();
//! assert_eq!(mesh.vertices(), &[0, 3, 6]);
//! ```

mod error;
mod source;
mod tessellation;

pub use error::{Error, Result};
pub use source::{FaceTessellation, TessellationSource, index_mesh_for_face, index_meshes};
pub use tessellation::Tessellation;

/// Re-export of the face decoder.
pub use tessface_decode as decode;
