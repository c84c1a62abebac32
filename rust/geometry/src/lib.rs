// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bricklayer Geometry
//!
//! Brick mesh synthesis and scene composition for LDraw build layers,
//! using nalgebra for transforms. Consumes the layered model produced by
//! `bricklayer-core` and emits renderable nodes plus a camera pose.

pub mod brick;
pub mod error;
pub mod mesh;
pub mod primitives;
pub mod scene;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use brick::{synthesize_brick, BrickGeometryCache, BrickMaterial};
pub use error::{Error, Result};
pub use mesh::{Aabb, Mesh};
pub use primitives::{box_mesh, cylinder_mesh};
pub use scene::{
    compose_document, frame_camera, CameraFrame, Scene, SceneComposer, SceneNode,
    DEFAULT_FOV_DEG,
};
pub use transform::{placement_transform, rotation_from_ldraw};
