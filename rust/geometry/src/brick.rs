// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brick geometry synthesis and caching
//!
//! Converts catalog dimensions into a renderable solid: a box plus an
//! array of cylindrical studs on the top face, sized per LDraw unit
//! conventions. Identical brick shapes are synthesized once and shared
//! via [`BrickGeometryCache`]; color and highlighting live on
//! [`BrickMaterial`] so caching is unaffected by color variation.

use crate::mesh::Mesh;
use crate::primitives::{box_mesh, cylinder_mesh};
use bricklayer_core::{
    BrickDimensions, BrickType, Rgb, STUD_DIAMETER_LDU, STUD_HEIGHT_LDU, STUD_PITCH_LDU,
    UNIT_SCALE,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

/// Circle resolution for stud cylinders
const STUD_SEGMENTS: u32 = 16;

/// Per-axis stud offsets rarely exceed a handful of entries
type StudOffsets = SmallVec<[f32; 8]>;

/// Synthesize the render mesh for one brick shape
///
/// The base box is scaled from LDU to world units. Studs are added unless
/// the shape is a studless tile: `round(extent / 20)` studs per axis at
/// one stud-pitch spacing, centered on the top face, each sitting exactly
/// on top of the box.
pub fn synthesize_brick(dims: &BrickDimensions) -> Mesh {
    let width = dims.width * UNIT_SCALE;
    let height = dims.height * UNIT_SCALE;
    let depth = dims.depth * UNIT_SCALE;

    let mut mesh = box_mesh(width, height, depth);

    if dims.brick_type.has_studs() {
        let stud_radius = STUD_DIAMETER_LDU / 2.0 * UNIT_SCALE;
        let stud_height = STUD_HEIGHT_LDU * UNIT_SCALE;
        let stud = cylinder_mesh(stud_radius, stud_height, STUD_SEGMENTS);

        let width_studs = (dims.width / STUD_PITCH_LDU).round() as u32;
        let depth_studs = (dims.depth / STUD_PITCH_LDU).round() as u32;
        let spacing = STUD_PITCH_LDU * UNIT_SCALE;

        let stud_y = height / 2.0 + stud_height / 2.0;
        for x in stud_offsets(width_studs, spacing) {
            for z in stud_offsets(depth_studs, spacing) {
                let mut placed = stud.clone();
                placed.translate(x, stud_y, z);
                mesh.merge(&placed);
            }
        }
    }

    mesh
}

/// Centered stud positions along one axis
///
/// An even stud count straddles the axis symmetrically; an odd count puts
/// one stud exactly on-axis.
fn stud_offsets(count: u32, spacing: f32) -> StudOffsets {
    let start = if count % 2 == 0 {
        -((count as f32 - 1.0) * spacing) / 2.0
    } else {
        -((count / 2) as f32) * spacing
    };
    (0..count).map(|i| start + i as f32 * spacing).collect()
}

/// Cache key: brick shape plus exact dimensions
///
/// Dimensions are keyed by bit pattern; catalog values are exact LDU
/// constants so equal shapes always collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GeometryKey {
    brick_type: BrickType,
    dims_bits: [u32; 3],
}

impl GeometryKey {
    fn new(dims: &BrickDimensions) -> Self {
        Self {
            brick_type: dims.brick_type,
            dims_bits: [
                dims.width.to_bits(),
                dims.height.to_bits(),
                dims.depth.to_bits(),
            ],
        }
    }
}

/// Memoizing store for synthesized brick meshes
///
/// A model may place the same brick shape hundreds of times; each distinct
/// shape is synthesized once and every placement shares the `Arc`. Keys
/// are drawn from the finite part catalog, which bounds the cache. The
/// cache is an explicit owned object, not a process-wide singleton, so
/// independent sessions do not share state.
#[derive(Debug, Default)]
pub struct BrickGeometryCache {
    entries: FxHashMap<GeometryKey, Arc<Mesh>>,
}

impl BrickGeometryCache {
    /// New empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct brick shapes synthesized so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch the mesh for a brick shape, synthesizing on first use
    ///
    /// Repeated calls with the same shape return the identical `Arc`.
    pub fn get_or_synthesize(&mut self, dims: &BrickDimensions) -> Arc<Mesh> {
        let key = GeometryKey::new(dims);
        if let Some(mesh) = self.entries.get(&key) {
            return Arc::clone(mesh);
        }

        tracing::debug!("synthesizing geometry for {}", dims.name());
        let mesh = Arc::new(synthesize_brick(dims));
        self.entries.insert(key, Arc::clone(&mesh));
        mesh
    }
}

/// Standard brick surface parameters
pub const BRICK_ROUGHNESS: f32 = 0.4;
pub const BRICK_METALNESS: f32 = 0.2;

/// Material for one placed brick, separate from its cached geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickMaterial {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl BrickMaterial {
    /// Material for a brick, optionally highlighted
    ///
    /// The most-recently-revealed layer is lifted toward white and given a
    /// faint glow so it stands out from the settled layers below.
    pub fn new(color: Rgb, highlight: bool) -> Self {
        if highlight {
            Self {
                color: color.lerp(Rgb::WHITE, 0.2),
                emissive: color.lerp(Rgb::WHITE, 0.1),
                emissive_intensity: 0.3,
                roughness: BRICK_ROUGHNESS,
                metalness: BRICK_METALNESS,
            }
        } else {
            Self {
                color,
                emissive: Rgb::BLACK,
                emissive_intensity: 0.0,
                roughness: BRICK_ROUGHNESS,
                metalness: BRICK_METALNESS,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bricklayer_core::dimensions_for_part;

    #[test]
    fn test_brick_has_studs_on_top() {
        let dims = dimensions_for_part("3001.dat");
        let mesh = synthesize_brick(&dims);

        let box_only = box_mesh(
            dims.width * UNIT_SCALE,
            dims.height * UNIT_SCALE,
            dims.depth * UNIT_SCALE,
        );
        assert!(mesh.vertex_count() > box_only.vertex_count());

        // Studs raise the top of the bounds by the stud height
        let aabb = mesh.bounds();
        let expected_top = (dims.height / 2.0 + STUD_HEIGHT_LDU) * UNIT_SCALE;
        assert_relative_eq!(aabb.max.y, expected_top, epsilon = 1e-5);
    }

    #[test]
    fn test_stud_count_follows_footprint() {
        let one_by_one = synthesize_brick(&dimensions_for_part("3005.dat"));
        let two_by_four = synthesize_brick(&dimensions_for_part("3001.dat"));

        let stud = cylinder_mesh(
            STUD_DIAMETER_LDU / 2.0 * UNIT_SCALE,
            STUD_HEIGHT_LDU * UNIT_SCALE,
            STUD_SEGMENTS,
        );
        let box_verts = 24;
        assert_eq!(one_by_one.vertex_count(), box_verts + stud.vertex_count());
        assert_eq!(
            two_by_four.vertex_count(),
            box_verts + 8 * stud.vertex_count()
        );
    }

    #[test]
    fn test_tile_has_no_studs() {
        let dims = dimensions_for_part("87079.dat");
        let mesh = synthesize_brick(&dims);
        assert_eq!(mesh.vertex_count(), 24);

        let aabb = mesh.bounds();
        assert_relative_eq!(aabb.max.y, dims.height / 2.0 * UNIT_SCALE, epsilon = 1e-5);
    }

    #[test]
    fn test_stud_offsets_even_and_odd() {
        // Even count: symmetric around the axis, no stud at zero
        let offsets = stud_offsets(2, 3.0);
        assert_eq!(offsets.as_slice(), &[-1.5, 1.5]);

        // Odd count: one stud exactly on-axis
        let offsets = stud_offsets(3, 3.0);
        assert_eq!(offsets.as_slice(), &[-3.0, 0.0, 3.0]);

        let offsets = stud_offsets(4, 3.0);
        assert_eq!(offsets.as_slice(), &[-4.5, -1.5, 1.5, 4.5]);
    }

    #[test]
    fn test_cache_idempotence() {
        // Same shape twice yields the identical cached mesh
        let mut cache = BrickGeometryCache::new();
        let dims = dimensions_for_part("3001.dat");

        let first = cache.get_or_synthesize(&dims);
        let second = cache.get_or_synthesize(&dims);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        // A different shape gets its own entry
        let other = cache.get_or_synthesize(&dimensions_for_part("3005.dat"));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_material_highlight() {
        let red = Rgb::from_hex(0xD01012);
        let plain = BrickMaterial::new(red, false);
        assert_eq!(plain.color, red);
        assert_eq!(plain.emissive, Rgb::BLACK);
        assert_eq!(plain.emissive_intensity, 0.0);

        let lit = BrickMaterial::new(red, true);
        assert_ne!(lit.color, red);
        assert!(lit.color.r >= red.r && lit.color.g >= red.g && lit.color.b >= red.b);
        assert_eq!(lit.emissive_intensity, 0.3);
        assert_eq!(lit.roughness, BRICK_ROUGHNESS);
    }
}
