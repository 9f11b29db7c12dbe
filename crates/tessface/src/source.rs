//! Access to the packed tessellation of a set of faces.

use tessface_decode::{
    DecodeOptions, DecodedMesh, FaceTessellationDescriptor, UsedEntities, decode_with,
};
use tracing::debug;

use crate::error::{Error, Result};

/// Owned packed tessellation record of one face.
///
/// The index data itself lives in the buffers of the owning
/// [`TessellationSource`]; the start offsets locate this face inside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceTessellation {
    pub used_entities: UsedEntities,
    pub triangulated_sizes: Vec<u32>,
    pub texture_channels: u32,
    pub triangulated_start: usize,
    pub wire_sizes: Vec<u32>,
    pub wire_start: usize,
}

impl FaceTessellation {
    /// Borrow this face together with the shared index buffers.
    #[must_use]
    pub fn descriptor<'a>(
        &'a self,
        triangulated_indices: &'a [u32],
        wire_indices: &'a [u32],
    ) -> FaceTessellationDescriptor<'a> {
        FaceTessellationDescriptor {
            used_entities: self.used_entities,
            triangulated_sizes: &self.triangulated_sizes,
            texture_channels: self.texture_channels,
            triangulated_indices,
            triangulated_start: self.triangulated_start,
            wire_sizes: &self.wire_sizes,
            wire_indices,
            wire_start: self.wire_start,
        }
    }
}

/// Provider of per-face packed tessellation data.
pub trait TessellationSource {
    /// Number of faces with tessellation data.
    fn face_count(&self) -> usize;

    /// Packed record of face `index`, `None` when out of range.
    fn face(&self, index: usize) -> Option<&FaceTessellation>;

    /// Triangulated index buffer shared by all faces.
    fn triangulated_indices(&self) -> &[u32];

    /// Wire index buffer shared by all faces.
    fn wire_indices(&self) -> &[u32];

    /// Descriptor of face `index`, ready to decode.
    fn descriptor(&self, index: usize) -> Option<FaceTessellationDescriptor<'_>> {
        self.face(index)
            .map(|face| face.descriptor(self.triangulated_indices(), self.wire_indices()))
    }
}

/// Decode the index mesh of one face.
pub fn index_mesh_for_face<S: TessellationSource + ?Sized>(
    source: &S,
    index: usize,
    options: &DecodeOptions,
) -> Result<DecodedMesh> {
    let descriptor = source.descriptor(index).ok_or(Error::FaceOutOfRange {
        index,
        count: source.face_count(),
    })?;
    decode_with(&descriptor, options).map_err(|source| Error::Format { index, source })
}

/// Decode every face in order, stopping at the first malformed one.
pub fn index_meshes<S: TessellationSource + ?Sized>(
    source: &S,
    options: &DecodeOptions,
) -> Result<Vec<DecodedMesh>> {
    debug!(faces = source.face_count(), "decoding tessellation faces");
    (0..source.face_count())
        .map(|index| index_mesh_for_face(source, index, options))
        .collect()
}
