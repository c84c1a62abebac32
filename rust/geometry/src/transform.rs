// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement transforms
//!
//! LDraw stores a row-major 3x3 rotation/scale matrix per placement and
//! points its vertical axis downward; the renderer expects column-major
//! transforms with +Y up. Both conversions are concentrated here — they
//! are the highest-risk correctness points in the pipeline, so each has a
//! dedicated fixture test.

use bricklayer_core::{Vec3, UNIT_SCALE};
use nalgebra::{Matrix4, Vector3};

/// Convert an LDraw row-major 3x3 matrix into a renderer rotation
///
/// The renderer consumes column-major transforms, so the LDraw rows are
/// written in as columns. Skipping this transposition renders models
/// mirrored or rotated the wrong way.
#[rustfmt::skip]
pub fn rotation_from_ldraw(m: &[f32; 9]) -> Matrix4<f32> {
    // Matrix4::new takes row-major arguments; feeding LDraw's columns as
    // rows performs the transposition
    Matrix4::new(
        m[0], m[3], m[6], 0.0,
        m[1], m[4], m[7], 0.0,
        m[2], m[5], m[8], 0.0,
        0.0,  0.0,  0.0,  1.0,
    )
}

/// Full world transform for one placement
///
/// Scales the LDU position into world units with the vertical sign
/// flipped (LDraw +Y is down), then applies the converted rotation on the
/// outside, so the rotation also turns the translated offset.
pub fn placement_transform(position: &Vec3, matrix: &[f32; 9]) -> Matrix4<f32> {
    let translation = Matrix4::new_translation(&Vector3::new(
        position.x * UNIT_SCALE,
        -position.y * UNIT_SCALE,
        position.z * UNIT_SCALE,
    ));
    rotation_from_ldraw(matrix) * translation
}
