// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Bricklayer Core
//!
//! LDraw placement parser and build-layer decomposition, built with
//! [nom](https://docs.rs/nom).
//!
//! ## Overview
//!
//! This crate turns a flat LDraw document into an ordered, incrementally
//! revealable build sequence:
//!
//! - **Line Parsing**: type-1 part-placement records (color, position,
//!   3x3 transform, part reference); everything else is skipped
//! - **Part Catalog**: total lookup from part reference to physical brick
//!   dimensions, with a fallback chain so unknown parts still render
//! - **Layer Decomposition**: vertical bucketing into bottom-up
//!   construction layers with per-layer and whole-model brick tallies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bricklayer_core::{decompose, parse_document, LayerConfig};
//!
//! let text = std::fs::read_to_string("model.ldr")?;
//! let (placements, summary) = parse_document(&text);
//! println!("{} parts in {} lines", summary.parsed_parts, summary.line_count);
//!
//! let model = decompose(placements, &LayerConfig::default())?;
//! for layer in &model.layers {
//!     println!("layer {}: {} parts", layer.index, layer.parts_count);
//! }
//! ```
//!
//! The core is synchronous and does no I/O; the host hands in the document
//! text and consumes layers plus statistics.
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization for the parsed data model

pub mod catalog;
pub mod color;
pub mod error;
pub mod layers;
pub mod parser;
pub mod units;

pub use catalog::{
    default_brick, dimensions_for_part, BrickClass, BrickDimensions, BrickTally, BrickType,
};
pub use color::{rgb_for_code, Rgb, DEFAULT_COLOR};
pub use error::{Error, Result};
pub use layers::{
    decompose, Layer, LayerConfig, LayeredModel, ModelStatistics, DEFAULT_MAX_LAYERS,
};
pub use parser::{parse_document, parse_line, DocumentSummary, Placement, Vec3};
pub use units::{
    ldu_to_world, BRICK_HEIGHT_LDU, LDU_TO_MM, PLATE_HEIGHT_LDU, STUD_DIAMETER_LDU,
    STUD_HEIGHT_LDU, STUD_PITCH_LDU, UNIT_SCALE,
};
