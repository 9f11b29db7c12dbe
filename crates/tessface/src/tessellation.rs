//! Owned in-memory tessellation.

use glam::{DVec2, DVec3};
use tessface_decode::DecodedMesh;

use crate::error::{Error, Result};
use crate::source::{FaceTessellation, TessellationSource};

/// Coordinate arrays, face records and index buffers of one tessellated
/// body.
///
/// Decoded vertex and normal indices are offsets into the flat `xyz`
/// coordinate arrays (a multiple of 3); texture indices are offsets into the
/// flat `uv` texture coordinate array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    coords: Vec<f64>,
    normals: Vec<f64>,
    texture_coords: Vec<f64>,
    faces: Vec<FaceTessellation>,
    triangulated_indices: Vec<u32>,
    wire_indices: Vec<u32>,
}

impl Tessellation {
    /// Tessellation over the flat `xyz` point coordinates.
    #[must_use]
    pub fn new(coords: Vec<f64>) -> Self {
        Self {
            coords,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_normals(mut self, normals: Vec<f64>) -> Self {
        self.normals = normals;
        self
    }

    #[must_use]
    pub fn with_texture_coords(mut self, texture_coords: Vec<f64>) -> Self {
        self.texture_coords = texture_coords;
        self
    }

    /// Set the packed face records and the index buffers they point into.
    #[must_use]
    pub fn with_faces(
        mut self,
        faces: Vec<FaceTessellation>,
        triangulated_indices: Vec<u32>,
        wire_indices: Vec<u32>,
    ) -> Self {
        self.faces = faces;
        self.triangulated_indices = triangulated_indices;
        self.wire_indices = wire_indices;
        self
    }

    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    #[must_use]
    pub fn normals(&self) -> &[f64] {
        &self.normals
    }

    #[must_use]
    pub fn texture_coords(&self) -> &[f64] {
        &self.texture_coords
    }

    /// Point at coordinate offset `index`.
    #[must_use]
    pub fn point(&self, index: u32) -> Option<DVec3> {
        vec3_at(&self.coords, index)
    }

    /// Normal at normal offset `index`.
    #[must_use]
    pub fn normal(&self, index: u32) -> Option<DVec3> {
        vec3_at(&self.normals, index)
    }

    /// Texture coordinate at offset `index`.
    #[must_use]
    pub fn texture_coord(&self, index: u32) -> Option<DVec2> {
        let start = index as usize;
        let uv = self.texture_coords.get(start..start.checked_add(2)?)?;
        Some(DVec2::new(uv[0], uv[1]))
    }

    /// Resolve every triangle of a decoded face to its corner positions.
    pub fn triangle_positions(&self, mesh: &DecodedMesh) -> Result<Vec<[DVec3; 3]>> {
        mesh.triangles()
            .map(|triangle| {
                let [a, b, c] = triangle.map(|corner| self.resolve_point(corner.vertex));
                Ok([a?, b?, c?])
            })
            .collect()
    }

    /// Resolve every corner normal of a decoded face.
    pub fn corner_normals(&self, mesh: &DecodedMesh) -> Result<Vec<DVec3>> {
        mesh.normals()
            .iter()
            .map(|&index| {
                self.normal(index).ok_or(Error::IndexOutOfRange {
                    array: "normal",
                    index,
                    len: self.normals.len(),
                })
            })
            .collect()
    }

    fn resolve_point(&self, index: u32) -> Result<DVec3> {
        self.point(index).ok_or(Error::IndexOutOfRange {
            array: "coordinate",
            index,
            len: self.coords.len(),
        })
    }
}

fn vec3_at(values: &[f64], index: u32) -> Option<DVec3> {
    let start = index as usize;
    let xyz = values.get(start..start.checked_add(3)?)?;
    Some(DVec3::from_slice(xyz))
}

impl TessellationSource for Tessellation {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, index: usize) -> Option<&FaceTessellation> {
        self.faces.get(index)
    }

    fn triangulated_indices(&self) -> &[u32] {
        &self.triangulated_indices
    }

    fn wire_indices(&self) -> &[u32] {
        &self.wire_indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::index_mesh_for_face;
    use tessface_decode::{DecodeOptions, UsedEntities};

    fn unit_square() -> Tessellation {
        let coords = vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        // One fan over the four corners, normal offset 0 for every point.
        let face = FaceTessellation {
            used_entities: UsedEntities::TRIANGLE_FAN,
            triangulated_sizes: vec![1, 4],
            ..FaceTessellation::default()
        };
        Tessellation::new(coords)
            .with_normals(vec![0.0, 0.0, 1.0])
            .with_texture_coords(vec![0.25, 0.75])
            .with_faces(vec![face], vec![0, 0, 0, 3, 0, 6, 0, 9], Vec::new())
    }

    #[test]
    fn lookups_respect_bounds() {
        let tess = unit_square();
        assert_eq!(tess.point(3), Some(DVec3::new(1.0, 0.0, 0.0)));
        assert_eq!(tess.point(10), None);
        assert_eq!(tess.point(u32::MAX), None);
        assert_eq!(tess.normal(0), Some(DVec3::Z));
        assert_eq!(tess.texture_coord(0), Some(DVec2::new(0.25, 0.75)));
        assert_eq!(tess.texture_coord(1), None);
    }

    #[test]
    fn resolves_decoded_triangles() {
        let tess = unit_square();
        let mesh = index_mesh_for_face(&tess, 0, &DecodeOptions::default()).unwrap();
        let positions = tess.triangle_positions(&mesh).unwrap();
        assert_eq!(
            positions,
            vec![
                [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)],
                [DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
            ]
        );
        let normals = tess.corner_normals(&mesh).unwrap();
        assert!(normals.iter().all(|&n| n == DVec3::Z));
    }

    #[test]
    fn out_of_range_vertex_is_reported() {
        let face = FaceTessellation {
            used_entities: UsedEntities::TRIANGLE_ONE_NORMAL,
            triangulated_sizes: vec![1],
            ..FaceTessellation::default()
        };
        let tess = Tessellation::new(vec![0.0; 9]).with_faces(
            vec![face],
            vec![0, 0, 3, 9],
            Vec::new(),
        );
        let mesh = index_mesh_for_face(&tess, 0, &DecodeOptions::default()).unwrap();
        assert_eq!(
            tess.triangle_positions(&mesh),
            Err(Error::IndexOutOfRange {
                array: "coordinate",
                index: 9,
                len: 9,
            })
        );
    }
}
