// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LDraw unit conventions
//!
//! All model coordinates and catalog dimensions are expressed in LDraw
//! Units (LDU), where 1 LDU ≈ 0.4 mm. The standard brick grid:
//!
//! - brick footprint cell (one stud pitch): 20 LDU (8 mm)
//! - brick height: 24 LDU (9.6 mm)
//! - plate height: 8 LDU (3.2 mm)
//! - stud diameter: 12 LDU (4.8 mm)
//! - stud height: 4 LDU (1.6 mm)

/// Millimetres per LDraw Unit
pub const LDU_TO_MM: f32 = 0.4;

/// Centre-to-centre stud spacing (one footprint cell)
pub const STUD_PITCH_LDU: f32 = 20.0;

/// Height of a standard brick; also the vertical layer quantum
pub const BRICK_HEIGHT_LDU: f32 = 24.0;

/// Height of a plate (one third of a brick)
pub const PLATE_HEIGHT_LDU: f32 = 8.0;

/// Diameter of a stud
pub const STUD_DIAMETER_LDU: f32 = 12.0;

/// Height of a stud above the top face
pub const STUD_HEIGHT_LDU: f32 = 4.0;

/// Display scale from LDU to renderer world units, calibrated so a
/// typical model fills the default viewport
pub const UNIT_SCALE: f32 = 0.15;

/// Convert an LDU length to renderer world units
#[inline]
pub fn ldu_to_world(ldu: f32) -> f32 {
    ldu * UNIT_SCALE
}
