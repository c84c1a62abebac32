// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Part catalog
//!
//! Static lookup from an LDraw part reference to physical brick dimensions.
//! Every reference resolves to *some* brick: lookup falls back through the
//! available-bricks allowlist, the full catalog, a digit-pair footprint
//! heuristic, and finally a default 2x4 brick. Unrecognized parts must
//! still render as something.

use crate::units::{BRICK_HEIGHT_LDU, STUD_PITCH_LDU};

/// Known catalog part shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrickType {
    Brick2x4,
    Brick4x2,
    Brick1x2,
    Brick2x1,
    Brick1x1,
    Brick2x2,
    Brick1x4,
    Brick2x3,
    Brick1x3,
    Tile2x4,
}

impl BrickType {
    /// Every catalog entry, in lookup precedence order
    pub const ALL: [BrickType; 10] = [
        BrickType::Brick2x4,
        BrickType::Brick4x2,
        BrickType::Brick1x2,
        BrickType::Brick2x1,
        BrickType::Brick1x1,
        BrickType::Brick2x2,
        BrickType::Brick1x4,
        BrickType::Brick2x3,
        BrickType::Brick1x3,
        BrickType::Tile2x4,
    ];

    /// The subset of parts the build pipeline can actually source,
    /// checked before the rest of the catalog
    pub const AVAILABLE: [BrickType; 6] = [
        BrickType::Brick2x4,
        BrickType::Brick2x2,
        BrickType::Brick1x2,
        BrickType::Brick1x1,
        BrickType::Brick1x4,
        BrickType::Tile2x4,
    ];

    /// The LDraw part file this shape corresponds to
    pub const fn part(self) -> &'static str {
        match self {
            BrickType::Brick2x4 => "3001.dat",
            BrickType::Brick4x2 => "2456.dat",
            BrickType::Brick1x2 => "3004.dat",
            BrickType::Brick2x1 => "3069b.dat",
            BrickType::Brick1x1 => "3005.dat",
            BrickType::Brick2x2 => "3003.dat",
            BrickType::Brick1x4 => "3010.dat",
            BrickType::Brick2x3 => "3002.dat",
            BrickType::Brick1x3 => "3622.dat",
            BrickType::Tile2x4 => "87079.dat",
        }
    }

    /// Human-readable part name
    pub const fn name(self) -> &'static str {
        match self {
            BrickType::Brick2x4 => "Brick 2 x 4",
            BrickType::Brick4x2 => "Brick 4 x 2",
            BrickType::Brick1x2 => "Brick 1 x 2",
            BrickType::Brick2x1 => "Brick 2 x 1",
            BrickType::Brick1x1 => "Brick 1 x 1",
            BrickType::Brick2x2 => "Brick 2 x 2",
            BrickType::Brick1x4 => "Brick 1 x 4",
            BrickType::Brick2x3 => "Brick 2 x 3",
            BrickType::Brick1x3 => "Brick 1 x 3",
            BrickType::Tile2x4 => "Tile 2 x 4",
        }
    }

    /// Footprint in studs (width, depth)
    pub const fn footprint(self) -> (u32, u32) {
        match self {
            BrickType::Brick2x4 => (2, 4),
            BrickType::Brick4x2 => (4, 2),
            BrickType::Brick1x2 => (1, 2),
            BrickType::Brick2x1 => (2, 1),
            BrickType::Brick1x1 => (1, 1),
            BrickType::Brick2x2 => (2, 2),
            BrickType::Brick1x4 => (1, 4),
            BrickType::Brick2x3 => (2, 3),
            BrickType::Brick1x3 => (1, 3),
            BrickType::Tile2x4 => (2, 4),
        }
    }

    /// Physical dimensions in LDU
    pub fn dimensions(self) -> BrickDimensions {
        let (w, d) = self.footprint();
        BrickDimensions {
            width: w as f32 * STUD_PITCH_LDU,
            height: BRICK_HEIGHT_LDU,
            depth: d as f32 * STUD_PITCH_LDU,
            brick_type: self,
        }
    }

    /// Tiles have no studs on the top face
    pub const fn has_studs(self) -> bool {
        !matches!(self, BrickType::Tile2x4)
    }
}

/// Physical brick dimensions in LDU, tagged with the catalog shape
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrickDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub brick_type: BrickType,
}

impl BrickDimensions {
    /// Human-readable part name
    pub const fn name(&self) -> &'static str {
        self.brick_type.name()
    }

    /// Tally category for this brick
    pub fn class(&self) -> BrickClass {
        if !self.brick_type.has_studs() {
            return BrickClass::Tile;
        }
        let w = (self.width / STUD_PITCH_LDU).round() as u32;
        let d = (self.depth / STUD_PITCH_LDU).round() as u32;
        match (w, d) {
            (2, 4) => BrickClass::TwoByFour,
            (4, 2) => BrickClass::FourByTwo,
            (2, 1) => BrickClass::TwoByOne,
            (1, 2) => BrickClass::OneByTwo,
            (1, 1) => BrickClass::OneByOne,
            (2, 2) => BrickClass::TwoByTwo,
            _ => BrickClass::Other,
        }
    }
}

/// Fallback dimensions when nothing in the catalog matches
pub fn default_brick() -> BrickDimensions {
    BrickType::Brick2x4.dimensions()
}

/// Resolve a part reference to brick dimensions
///
/// Matching is case-insensitive and only the final path segment of the
/// reference is significant. Falls back through:
/// 1. the available-bricks allowlist (substring match)
/// 2. the full catalog (substring match)
/// 3. digit-pair footprint inference from the reference name
/// 4. the default 2x4 brick
///
/// This chain is total: every input, including nonsense, yields dimensions.
pub fn dimensions_for_part(part_ref: &str) -> BrickDimensions {
    let part_name = part_ref
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(part_ref)
        .to_ascii_lowercase();

    for brick in BrickType::AVAILABLE {
        if part_name.contains(brick.part()) {
            return brick.dimensions();
        }
    }

    for brick in BrickType::ALL {
        if part_name.contains(brick.part()) {
            return brick.dimensions();
        }
    }

    if let Some(dims) = infer_from_digits(&part_name) {
        return dims;
    }

    default_brick()
}

/// Footprints eligible for digit-pair inference, in match order
const FOOTPRINT_MATCHES: [BrickType; 7] = [
    BrickType::Brick2x4,
    BrickType::Brick4x2,
    BrickType::Brick2x1,
    BrickType::Brick1x2,
    BrickType::Brick1x1,
    BrickType::Brick2x2,
    BrickType::Brick1x4,
];

/// Best-effort footprint inference: the first two digit runs in the name
/// are interpreted as stud counts and checked against known footprints in
/// both orderings. Names with unrelated digits may misclassify; the
/// heuristic trades accuracy for always rendering something.
fn infer_from_digits(part_name: &str) -> Option<BrickDimensions> {
    let mut runs = digit_runs(part_name);
    if runs.len() < 2 {
        return None;
    }
    let (d1, d2) = (runs.remove(0), runs.remove(0));

    for brick in FOOTPRINT_MATCHES {
        let (w, d) = brick.footprint();
        if (w == d1 && d == d2) || (w == d2 && d == d1) {
            return Some(brick.dimensions());
        }
    }
    None
}

/// Extract consecutive digit runs from a name, skipping runs too long to
/// be a stud count
fn digit_runs(name: &str) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            if let Ok(n) = current.parse::<u32>() {
                runs.push(n);
            }
            current.clear();
        }
    }
    if !current.is_empty() {
        if let Ok(n) = current.parse::<u32>() {
            runs.push(n);
        }
    }
    runs
}

/// Tally category for brick statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrickClass {
    TwoByFour,
    FourByTwo,
    TwoByOne,
    OneByTwo,
    OneByOne,
    TwoByTwo,
    Tile,
    Other,
}

impl BrickClass {
    /// Every category, in display order
    pub const ALL: [BrickClass; 8] = [
        BrickClass::TwoByFour,
        BrickClass::FourByTwo,
        BrickClass::TwoByOne,
        BrickClass::OneByTwo,
        BrickClass::OneByOne,
        BrickClass::TwoByTwo,
        BrickClass::Tile,
        BrickClass::Other,
    ];

    /// Display label
    pub const fn as_str(self) -> &'static str {
        match self {
            BrickClass::TwoByFour => "2x4",
            BrickClass::FourByTwo => "4x2",
            BrickClass::TwoByOne => "2x1",
            BrickClass::OneByTwo => "1x2",
            BrickClass::OneByOne => "1x1",
            BrickClass::TwoByTwo => "2x2",
            BrickClass::Tile => "tile",
            BrickClass::Other => "other",
        }
    }

    const fn index(self) -> usize {
        match self {
            BrickClass::TwoByFour => 0,
            BrickClass::FourByTwo => 1,
            BrickClass::TwoByOne => 2,
            BrickClass::OneByTwo => 3,
            BrickClass::OneByOne => 4,
            BrickClass::TwoByTwo => 5,
            BrickClass::Tile => 6,
            BrickClass::Other => 7,
        }
    }
}

/// Count of placements per brick category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrickTally {
    counts: [u32; 8],
}

impl BrickTally {
    /// New empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one brick of the given category
    #[inline]
    pub fn add(&mut self, class: BrickClass) {
        self.counts[class.index()] += 1;
    }

    /// Count for one category
    #[inline]
    pub fn get(&self, class: BrickClass) -> u32 {
        self.counts[class.index()]
    }

    /// Total bricks across all categories
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: &BrickTally) {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }

    /// Iterate (category, count) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (BrickClass, u32)> + '_ {
        BrickClass::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Non-zero categories sorted by count, highest first
    pub fn sorted_counts(&self) -> Vec<(BrickClass, u32)> {
        let mut entries: Vec<_> = self.iter().filter(|&(_, n)| n > 0).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}
