//! Property-based tests for face decoding.
//!
//! Faces are generated by encoding random block layouts, so every generated
//! buffer is well formed and its declared triangle count is known.
//!
//! Run with: cargo test -p tessface-decode --test proptest_decode

use proptest::prelude::*;
use tessface_decode::flags::{NORMAL_SINGLE, NormalMode, Shape, WIRE_IS_CLOSING, WIRE_IS_NOT_DRAWN};
use tessface_decode::{DecodedMesh, FaceTessellationDescriptor, UsedEntities, Variant, decode};

// =============================================================================
// Encoding helpers
// =============================================================================

/// Declared sizes of one generated block.
#[derive(Debug, Clone)]
enum BlockSpec {
    Triangles(u32),
    /// `(points, shares_normal)` per primitive.
    Primitives(Vec<(u32, bool)>),
}

#[derive(Debug, Clone)]
struct EncodedFace {
    used_entities: UsedEntities,
    sizes: Vec<u32>,
    indices: Vec<u32>,
    channels: u32,
    declared_triangles: usize,
}

impl EncodedFace {
    fn descriptor(&self) -> FaceTessellationDescriptor<'_> {
        FaceTessellationDescriptor {
            used_entities: self.used_entities,
            triangulated_sizes: &self.sizes,
            texture_channels: self.channels,
            triangulated_indices: &self.indices,
            ..Default::default()
        }
    }
}

/// Append `count` fresh, distinct index values.
fn push_fresh(indices: &mut Vec<u32>, count: u32) {
    let base = u32::try_from(indices.len()).unwrap();
    indices.extend(base..base + count);
}

fn encode(blocks: &[Option<BlockSpec>], channels: u32) -> EncodedFace {
    let mut face = EncodedFace {
        used_entities: UsedEntities::empty(),
        sizes: Vec::new(),
        indices: Vec::new(),
        channels,
        declared_triangles: 0,
    };

    for (variant, block) in Variant::CANONICAL_ORDER.into_iter().zip(blocks) {
        let Some(block) = block else { continue };
        face.used_entities |= variant.flag();
        let ch = if variant.is_textured() { channels } else { 0 };
        match block {
            BlockSpec::Triangles(count) => {
                face.sizes.push(*count);
                face.declared_triangles += *count as usize;
                let per_triangle = match variant.normals() {
                    NormalMode::PerVertex => 3 * (2 + ch),
                    NormalMode::OneNormal => 1 + ch + 3,
                };
                push_fresh(&mut face.indices, count * per_triangle);
            }
            BlockSpec::Primitives(primitives) => {
                face.sizes.push(u32::try_from(primitives.len()).unwrap());
                for &(points, shares_normal) in primitives {
                    let shared = shares_normal && variant.normals() == NormalMode::OneNormal;
                    face.sizes
                        .push(if shared { points | NORMAL_SINGLE } else { points });
                    face.declared_triangles += points.saturating_sub(2) as usize;
                    let len = if shared {
                        1 + ch + points
                    } else {
                        points * (2 + ch)
                    };
                    push_fresh(&mut face.indices, len);
                }
            }
        }
    }
    face
}

fn triangles(mesh: &DecodedMesh) -> Vec<[u32; 3]> {
    mesh.vertices()
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect()
}

fn pack_edge(vertices: u32, closing: bool, hidden: bool) -> u32 {
    let mut packed = vertices;
    if closing {
        packed |= WIRE_IS_CLOSING;
    }
    if hidden {
        packed |= WIRE_IS_NOT_DRAWN;
    }
    packed
}

fn directed_edges(t: [u32; 3]) -> [(u32, u32); 3] {
    [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

// =============================================================================
// Strategies
// =============================================================================

fn arb_block(variant: Variant) -> BoxedStrategy<BlockSpec> {
    match variant.shape() {
        Shape::Triangles => (0u32..6).prop_map(BlockSpec::Triangles).boxed(),
        Shape::Fan | Shape::Strip => prop::collection::vec((0u32..9, any::<bool>()), 0..4)
            .prop_map(BlockSpec::Primitives)
            .boxed(),
    }
}

fn arb_face() -> impl Strategy<Value = EncodedFace> {
    let blocks: Vec<_> = Variant::CANONICAL_ORDER
        .into_iter()
        .map(|variant| prop::option::of(arb_block(variant)))
        .collect();
    (blocks, 1u32..4).prop_map(|(blocks, channels)| encode(&blocks, channels))
}

fn arb_strip_variant() -> impl Strategy<Value = Variant> {
    prop::sample::select(vec![
        Variant::Strips,
        Variant::OneNormalStrips,
        Variant::TexturedStrips,
        Variant::OneNormalTexturedStrips,
    ])
}

fn single_block(variant: Variant, block: BlockSpec, channels: u32) -> EncodedFace {
    let blocks: Vec<_> = Variant::CANONICAL_ORDER
        .into_iter()
        .map(|v| (v == variant).then(|| block.clone()))
        .collect();
    encode(&blocks, channels)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn fan_emits_n_minus_two_triangles_around_root(
        pairs in prop::collection::vec((any::<u32>(), any::<u32>()), 3..40),
    ) {
        let n = u32::try_from(pairs.len()).unwrap();
        let indices: Vec<u32> = pairs.iter().flat_map(|&(nrm, v)| [nrm, v]).collect();
        let sizes = [1, n];
        let descriptor = FaceTessellationDescriptor {
            used_entities: UsedEntities::TRIANGLE_FAN,
            triangulated_sizes: &sizes,
            triangulated_indices: &indices,
            ..Default::default()
        };
        let mesh = decode(&descriptor).unwrap();
        prop_assert_eq!(mesh.triangle_count(), pairs.len() - 2);
        for (k, triangle) in mesh.triangles().enumerate() {
            prop_assert_eq!((triangle[0].normal, triangle[0].vertex), pairs[0]);
            prop_assert_eq!((triangle[1].normal, triangle[1].vertex), pairs[k + 1]);
            prop_assert_eq!((triangle[2].normal, triangle[2].vertex), pairs[k + 2]);
        }
    }

    #[test]
    fn shared_normal_fan_broadcasts_attributes(
        points in 3u32..40,
        channels in 1u32..4,
    ) {
        let face = single_block(
            Variant::OneNormalTexturedFans,
            BlockSpec::Primitives(vec![(points, true)]),
            channels,
        );
        let mesh = decode(&face.descriptor()).unwrap();
        prop_assert_eq!(mesh.triangle_count(), points as usize - 2);
        let shared_normal = face.indices[0];
        let shared_textures = &face.indices[1..=channels as usize];
        let root = face.indices[1 + channels as usize];
        for triangle in mesh.triangles() {
            prop_assert_eq!(triangle[0].vertex, root);
            for corner in triangle {
                prop_assert_eq!(corner.normal, shared_normal);
                prop_assert_eq!(corner.textures, shared_textures);
            }
        }
    }

    #[test]
    fn strip_alternates_winding(
        variant in arb_strip_variant(),
        points in 3u32..40,
        shared in any::<bool>(),
        channels in 1u32..3,
    ) {
        let face = single_block(variant, BlockSpec::Primitives(vec![(points, shared)]), channels);
        let mesh = decode(&face.descriptor()).unwrap();
        let triangles = triangles(&mesh);
        prop_assert_eq!(triangles.len(), points as usize - 2);
        for pair in triangles.windows(2) {
            let common: Vec<_> = directed_edges(pair[0])
                .into_iter()
                .filter(|(a, b)| pair[1].contains(a) && pair[1].contains(b))
                .collect();
            prop_assert_eq!(common.len(), 1);
            let (a, b) = common[0];
            prop_assert!(directed_edges(pair[1]).contains(&(b, a)));
        }
    }

    #[test]
    fn decoded_corners_match_declared_triangles(face in arb_face()) {
        let mesh = decode(&face.descriptor()).unwrap();
        prop_assert_eq!(mesh.vertices().len(), 3 * face.declared_triangles);
        prop_assert_eq!(mesh.normals().len(), mesh.vertices().len());
        if mesh.texture_channels() > 0 {
            prop_assert_eq!(
                mesh.textures().len(),
                mesh.vertices().len() * mesh.texture_channels()
            );
        } else {
            prop_assert!(mesh.textures().is_empty());
        }
    }

    #[test]
    fn decode_is_pure(face in arb_face()) {
        let descriptor = face.descriptor();
        prop_assert_eq!(decode(&descriptor), decode(&descriptor));
    }

    #[test]
    fn arbitrary_input_never_panics(
        mask in any::<u16>(),
        sizes in prop::collection::vec(0u32..6, 0..20),
        indices in prop::collection::vec(any::<u32>(), 0..64),
        channels in 0u32..3,
        wire in prop::collection::vec((0u32..4, any::<bool>(), any::<bool>()), 0..6),
        wire_indices in prop::collection::vec(any::<u32>(), 0..16),
    ) {
        let wire_sizes: Vec<u32> = wire
            .iter()
            .map(|&(n, closing, hidden)| pack_edge(n, closing, hidden))
            .collect();
        let descriptor = FaceTessellationDescriptor {
            used_entities: UsedEntities::from_bits_retain(mask),
            triangulated_sizes: &sizes,
            texture_channels: channels,
            triangulated_indices: &indices,
            wire_sizes: &wire_sizes,
            wire_indices: &wire_indices,
            ..Default::default()
        };
        let first = decode(&descriptor);
        prop_assert_eq!(&first, &decode(&descriptor));
        if let Ok(mesh) = first {
            prop_assert_eq!(mesh.vertices().len() % 3, 0);
            prop_assert_eq!(mesh.normals().len(), mesh.vertices().len());
        }
    }

    #[test]
    fn one_loop_per_closing_flag(
        edges in prop::collection::vec((0u32..5, any::<bool>(), any::<bool>()), 1..20),
    ) {
        let mut edges = edges;
        if let Some(last) = edges.last_mut() {
            last.1 = true;
        }
        let sizes: Vec<u32> = edges
            .iter()
            .map(|&(n, closing, hidden)| pack_edge(n, closing, hidden))
            .collect();
        let total: u32 = edges.iter().map(|e| e.0).sum();
        let indices: Vec<u32> = (0..total).collect();
        let descriptor = FaceTessellationDescriptor {
            wire_sizes: &sizes,
            wire_indices: &indices,
            ..Default::default()
        };
        let mesh = decode(&descriptor).unwrap();
        let closing = edges.iter().filter(|e| e.1).count();
        prop_assert_eq!(mesh.loops().len(), closing);

        let decoded: Vec<_> = mesh.loops().iter().flat_map(|l| &l.edges).collect();
        prop_assert_eq!(decoded.len(), edges.len());
        for (edge, &(n, _, hidden)) in decoded.iter().zip(&edges) {
            prop_assert_eq!(edge.vertices.len(), n as usize);
            prop_assert_eq!(edge.visible, !hidden);
        }
    }
}
