// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layer decomposition
//!
//! Groups part placements into an ordered sequence of construction layers
//! by bucketing on the vertical axis. LDraw's Y axis points down, so the
//! greatest Y coordinate is the physically lowest slice of the model; the
//! output is re-indexed so callers build from layer 0 upward.

use crate::catalog::BrickTally;
use crate::error::{Error, Result};
use crate::parser::Placement;
use crate::units::BRICK_HEIGHT_LDU;

/// Display cap on layer count. Very tall models compress several physical
/// brick heights into one visual layer; very short models still get one.
pub const DEFAULT_MAX_LAYERS: usize = 15;

/// Tuning for the decomposer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerConfig {
    /// Upper bound on the number of layers produced
    pub max_layers: usize,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            max_layers: DEFAULT_MAX_LAYERS,
        }
    }
}

/// One horizontal slice of the model, in build order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    /// Build-order index: 0 is the structurally lowest slice
    pub index: usize,
    /// Placements belonging to this slice
    pub parts: Vec<Placement>,
    /// Cached `parts.len()`
    pub parts_count: usize,
    /// Brick-category tally for this slice
    pub brick_counts: BrickTally,
}

/// Whole-model statistics, recomputed per parse
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelStatistics {
    /// Total placements across all layers
    pub total_pieces: usize,
    /// Brick-category tally over the whole model
    pub total_brick_counts: BrickTally,
}

/// Ordered layers plus statistics for one parsed document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayeredModel {
    /// Layers in build order, bottom slice first
    pub layers: Vec<Layer>,
    pub statistics: ModelStatistics,
}

impl LayeredModel {
    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Pieces contained in the first `visible` layers
    pub fn visible_pieces(&self, visible: usize) -> usize {
        self.layers
            .iter()
            .take(visible)
            .map(|l| l.parts_count)
            .sum()
    }
}

/// Decompose placements into build-ordered layers
///
/// The vertical extent is split into at most `config.max_layers` buckets
/// of equal thickness; every placement lands in exactly one bucket. A
/// perfectly flat model is treated as spanning one brick height so the
/// range is never zero.
///
/// An empty placement list is an explicit [`Error::NoBuildableContent`],
/// not an empty-but-successful result.
pub fn decompose(mut placements: Vec<Placement>, config: &LayerConfig) -> Result<LayeredModel> {
    if placements.is_empty() {
        return Err(Error::NoBuildableContent);
    }
    let total_pieces = placements.len();

    // Larger Y is physically lower; sort bottom-most first
    placements.sort_by(|a, b| b.position.y.total_cmp(&a.position.y));

    let min_y = placements
        .iter()
        .map(|p| p.position.y)
        .fold(f32::INFINITY, f32::min);
    let mut max_y = placements
        .iter()
        .map(|p| p.position.y)
        .fold(f32::NEG_INFINITY, f32::max);

    // Flat models span one brick height so the range is non-zero
    if min_y == max_y {
        max_y += BRICK_HEIGHT_LDU;
    }
    let range = max_y - min_y;

    let possible_layers = (range / BRICK_HEIGHT_LDU).ceil() as usize;
    let target_layers = possible_layers.clamp(1, config.max_layers.max(1));
    let thickness = range / target_layers as f32;

    tracing::debug!(
        "min y {}, max y {}, range {}, possible layers {}, target layers {}",
        min_y,
        max_y,
        range,
        possible_layers,
        target_layers
    );

    let mut buckets: Vec<Vec<Placement>> = std::iter::repeat_with(Vec::new)
        .take(target_layers)
        .collect();
    let mut max_bucket = 0;

    for placement in placements {
        let normalized_y = placement.position.y - min_y;
        let bucket = ((normalized_y / thickness).floor() as usize).min(target_layers - 1);
        max_bucket = max_bucket.max(bucket);
        buckets[bucket].push(placement);
    }

    let ordered = to_build_order(buckets, max_bucket);

    let mut total_brick_counts = BrickTally::new();
    let layers: Vec<Layer> = ordered
        .into_iter()
        .enumerate()
        .map(|(index, parts)| {
            let mut brick_counts = BrickTally::new();
            for part in &parts {
                let class = part.dimensions.class();
                brick_counts.add(class);
                total_brick_counts.add(class);
            }
            Layer {
                index,
                parts_count: parts.len(),
                parts,
                brick_counts,
            }
        })
        .collect();

    Ok(LayeredModel {
        layers,
        statistics: ModelStatistics {
            total_pieces,
            total_brick_counts,
        },
    })
}

/// Reorder raw buckets into build order
///
/// Bucket indices grow with Y, and Y grows downward, so the bucket with
/// the greatest index holds the physically lowest slice. Reversing puts
/// that slice first; empty buckets between occupied ones survive as empty
/// layers so indices stay contiguous.
fn to_build_order(mut buckets: Vec<Vec<Placement>>, max_bucket: usize) -> Vec<Vec<Placement>> {
    buckets.truncate(max_bucket + 1);
    buckets.reverse();
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BrickClass;
    use crate::parser::parse_document;

    fn placements_at(ys: &[f32]) -> Vec<Placement> {
        ys.iter()
            .map(|&y| {
                parse_line_at(y, "3001.dat")
            })
            .collect()
    }

    fn parse_line_at(y: f32, part: &str) -> Placement {
        let line = format!("1 4 0 {y} 0 1 0 0 0 1 0 0 0 1 {part}");
        crate::parser::parse_line(&line).unwrap().unwrap()
    }

    #[test]
    fn test_empty_input_is_explicit() {
        // Zero placements is a distinct signal, not a zero-layer success
        let err = decompose(Vec::new(), &LayerConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NoBuildableContent));
    }

    #[test]
    fn test_bottom_up_ordering() {
        // Y=48 is physically lowest and must come first
        let model = decompose(placements_at(&[0.0, 24.0, 48.0]), &LayerConfig::default()).unwrap();
        assert!(model.layer_count() >= 1);

        let first = &model.layers[0];
        let last = model.layers.last().unwrap();
        assert!(first.parts.iter().any(|p| p.position.y == 48.0));
        assert!(last.parts.iter().any(|p| p.position.y == 0.0));
        assert!(!last.parts.iter().any(|p| p.position.y == 48.0));
    }

    #[test]
    fn test_layer_indices_contiguous() {
        let model = decompose(placements_at(&[0.0, 24.0, 48.0, 72.0]), &LayerConfig::default())
            .unwrap();
        for (i, layer) in model.layers.iter().enumerate() {
            assert_eq!(layer.index, i);
        }
    }

    #[test]
    fn test_coverage_and_conservation() {
        // No placement lost or duplicated, counts add up
        let ys = [0.0, 0.0, 24.0, 48.0, 48.0, 96.0, 120.0];
        let model = decompose(placements_at(&ys), &LayerConfig::default()).unwrap();

        let spread: usize = model.layers.iter().map(|l| l.parts.len()).sum();
        assert_eq!(spread, ys.len());
        assert_eq!(model.statistics.total_pieces, ys.len());

        let count_sum: usize = model.layers.iter().map(|l| l.parts_count).sum();
        assert_eq!(count_sum, model.statistics.total_pieces);

        for class in BrickClass::ALL {
            let per_layer: u32 = model.layers.iter().map(|l| l.brick_counts.get(class)).sum();
            assert_eq!(per_layer, model.statistics.total_brick_counts.get(class));
        }
    }

    #[test]
    fn test_tally_categories() {
        let placements = vec![
            parse_line_at(0.0, "3001.dat"),
            parse_line_at(0.0, "3001.dat"),
            parse_line_at(0.0, "3005.dat"),
            parse_line_at(0.0, "87079.dat"),
        ];
        let model = decompose(placements, &LayerConfig::default()).unwrap();
        let totals = &model.statistics.total_brick_counts;
        assert_eq!(totals.get(BrickClass::TwoByFour), 2);
        assert_eq!(totals.get(BrickClass::OneByOne), 1);
        assert_eq!(totals.get(BrickClass::Tile), 1);
        assert_eq!(totals.total(), 4);
    }

    #[test]
    fn test_flat_model_gets_one_layer() {
        let model = decompose(placements_at(&[24.0, 24.0, 24.0]), &LayerConfig::default()).unwrap();
        assert_eq!(model.layer_count(), 1);
        assert_eq!(model.layers[0].parts_count, 3);
    }

    #[test]
    fn test_layer_count_bounds() {
        // 1 <= layers <= 15 regardless of model height
        let short = decompose(placements_at(&[0.0, 10.0]), &LayerConfig::default()).unwrap();
        assert!(short.layer_count() >= 1);

        // 40 brick heights tall, still capped at 15
        let ys: Vec<f32> = (0..40).map(|i| i as f32 * BRICK_HEIGHT_LDU).collect();
        let tall = decompose(placements_at(&ys), &LayerConfig::default()).unwrap();
        assert!(tall.layer_count() <= DEFAULT_MAX_LAYERS);
        assert!(tall.layer_count() >= 1);
    }

    #[test]
    fn test_configurable_cap() {
        let ys: Vec<f32> = (0..40).map(|i| i as f32 * BRICK_HEIGHT_LDU).collect();
        let config = LayerConfig { max_layers: 5 };
        let model = decompose(placements_at(&ys), &config).unwrap();
        assert_eq!(model.layer_count(), 5);
    }

    #[test]
    fn test_empty_intermediate_layers_survive() {
        // A gap in the model keeps its (empty) layers so indices stay contiguous
        let model = decompose(placements_at(&[0.0, 240.0]), &LayerConfig::default()).unwrap();
        assert_eq!(model.layer_count(), 10);
        assert_eq!(model.layers[0].parts_count, 1);
        assert_eq!(model.layers.last().unwrap().parts_count, 1);
        assert!(model.layers[1..9].iter().all(|l| l.parts_count == 0));
    }

    #[test]
    fn test_visible_pieces() {
        let model = decompose(placements_at(&[0.0, 24.0, 24.0, 48.0]), &LayerConfig::default())
            .unwrap();
        assert_eq!(model.visible_pieces(model.layer_count()), 4);
        assert!(model.visible_pieces(1) >= 1);
        assert_eq!(model.visible_pieces(0), 0);
    }

    #[test]
    fn test_scenario_end_to_end() {
        let doc = "\
0 Test Model
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 14 0 24 0 1 0 0 0 1 0 0 0 1 3005.dat
";
        let (placements, _) = parse_document(doc);
        let model = decompose(placements, &LayerConfig::default()).unwrap();
        assert!(model.layer_count() >= 1);
        assert_eq!(model.statistics.total_pieces, 2);

        // The Y=24 brick is physically lower and builds first
        assert_eq!(model.layers[0].parts[0].color, 14);
    }
}
