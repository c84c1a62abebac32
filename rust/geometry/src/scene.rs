// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene composition
//!
//! Assembles the first N build layers into a renderable scene: one node
//! per placement with cached geometry, a per-placement world transform,
//! and a material that highlights the most-recently-revealed layer. After
//! assembly the whole subset is framed by a camera at a fixed azimuth and
//! elevation, recomputed on every visible-layer change.

use crate::brick::{BrickGeometryCache, BrickMaterial};
use crate::error::{Error, Result};
use crate::mesh::{Aabb, Mesh};
use crate::transform::placement_transform;
use bricklayer_core::{
    decompose, parse_document, rgb_for_code, LayerConfig, LayeredModel,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::Arc;

/// Vertical field of view used for framing
pub const DEFAULT_FOV_DEG: f32 = 45.0;

/// Camera placement angle around the vertical axis
const CAMERA_AZIMUTH_RAD: f32 = std::f32::consts::FRAC_PI_4;

/// Camera elevation above the horizon
const CAMERA_ELEVATION_RAD: f32 = std::f32::consts::FRAC_PI_6;

/// Distance margin so the model does not touch the viewport edges
const CAMERA_MARGIN: f32 = 1.5;

/// One placed brick, ready to render
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Shared brick geometry from the cache
    pub mesh: Arc<Mesh>,
    /// World transform for this placement
    pub transform: Matrix4<f32>,
    pub material: BrickMaterial,
    /// Build-order layer this node belongs to
    pub layer_index: usize,
}

/// Camera pose framing the assembled subset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub fov_deg: f32,
}

/// A renderable assembly of the first N build layers
#[derive(Debug, Clone)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    /// Bounds of the assembled subset in world units
    pub bounds: Aabb,
    pub camera: CameraFrame,
    /// How many layers this scene actually shows
    pub visible_layers: usize,
}

/// Assembles scenes from layered models, reusing brick geometry
///
/// Owns the geometry cache for its session; composing several reveal
/// steps of the same model synthesizes each distinct brick shape once.
#[derive(Debug)]
pub struct SceneComposer {
    cache: BrickGeometryCache,
    fov_deg: f32,
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneComposer {
    /// New composer with an empty cache and default field of view
    pub fn new() -> Self {
        Self {
            cache: BrickGeometryCache::new(),
            fov_deg: DEFAULT_FOV_DEG,
        }
    }

    /// The geometry cache backing this composer
    pub fn cache(&self) -> &BrickGeometryCache {
        &self.cache
    }

    /// Assemble the first `visible_layers` layers into a scene
    ///
    /// The count is clamped to `[1, layer_count]`; only placements in the
    /// single newest included layer get the highlight material. The camera
    /// is re-framed around the assembled subset on every call.
    pub fn compose(&mut self, model: &LayeredModel, visible_layers: usize) -> Result<Scene> {
        let layer_count = model.layer_count();
        if layer_count == 0 {
            return Err(Error::EmptyScene("model has no layers".to_string()));
        }
        let visible = visible_layers.clamp(1, layer_count);

        let mut nodes = Vec::with_capacity(model.visible_pieces(visible));
        let mut bounds = Aabb::new();

        for (i, layer) in model.layers.iter().take(visible).enumerate() {
            let newest = i + 1 == visible;
            for part in &layer.parts {
                let mesh = self.cache.get_or_synthesize(&part.dimensions);
                let transform = placement_transform(&part.position, &part.matrix);
                bounds.expand_transformed(&mesh.bounds(), &transform);
                nodes.push(SceneNode {
                    mesh,
                    transform,
                    material: BrickMaterial::new(rgb_for_code(part.color), newest),
                    layer_index: layer.index,
                });
            }
        }

        tracing::debug!(
            "composed {} nodes from {} of {} layers",
            nodes.len(),
            visible,
            layer_count
        );

        let camera = frame_camera(&bounds, self.fov_deg);
        Ok(Scene {
            nodes,
            bounds,
            camera,
            visible_layers: visible,
        })
    }
}

/// Frame a camera so the bounded subset fits the viewport
///
/// The camera sits at a 45-degree azimuth and 30-degree elevation, far
/// enough back that the largest extent fits the field of view with some
/// margin, looking at the bounds center.
pub fn frame_camera(bounds: &Aabb, fov_deg: f32) -> CameraFrame {
    let center = bounds.center();
    let fov = fov_deg.to_radians();
    let distance = bounds.max_dim() / (2.0 * (fov / 2.0).tan()) * CAMERA_MARGIN;

    let offset = Vector3::new(
        distance * CAMERA_AZIMUTH_RAD.sin() * CAMERA_ELEVATION_RAD.cos(),
        distance * CAMERA_ELEVATION_RAD.sin(),
        distance * CAMERA_AZIMUTH_RAD.cos() * CAMERA_ELEVATION_RAD.cos(),
    );

    CameraFrame {
        position: center + offset,
        target: center,
        fov_deg,
    }
}

/// Run the whole pipeline on raw LDraw text
///
/// Parses, decomposes with `config`, and composes `visible` layers (all
/// layers when `None`). Convenience for hosts that do not need to hold
/// the intermediate placement list.
pub fn compose_document(
    text: &str,
    config: &LayerConfig,
    composer: &mut SceneComposer,
    visible: Option<usize>,
) -> Result<(LayeredModel, Scene)> {
    let (placements, _) = parse_document(text);
    let model = decompose(placements, config)?;
    let visible = visible.unwrap_or_else(|| model.layer_count());
    let scene = composer.compose(&model, visible)?;
    Ok((model, scene))
}
