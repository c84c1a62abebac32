// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LDraw line parser using nom
//!
//! Extracts type-1 part-placement records from LDraw documents. Only the
//! placement subset is handled: comments, meta commands, and drawing
//! primitives (line types 0 and 2-5) are skipped silently, and a malformed
//! part line is skipped with a warning rather than aborting the document.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space1},
    combinator::map_res,
    multi::count,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::catalog::{dimensions_for_part, BrickDimensions};
use crate::error::{Error, Result};

/// Position in LDU
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One parsed type-1 part placement
///
/// Token layout of the source line:
/// `1 <color> <x> <y> <z> <a>..<i> <part.dat>`
/// where a..i are the rows of a 3x3 rotation/scale matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// LDraw color code
    pub color: u32,
    /// Translation in LDU
    pub position: Vec3,
    /// Row-major 3x3 rotation/scale matrix
    pub matrix: [f32; 9],
    /// Referenced part file, as written in the document
    pub part_ref: String,
    /// Catalog dimensions; the fallback chain guarantees these exist
    pub dimensions: BrickDimensions,
}

/// Counters accumulated over one document parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentSummary {
    /// Lines seen, including blanks and comments
    pub line_count: usize,
    /// Valid part placements extracted
    pub parsed_parts: usize,
    /// Malformed type-1 lines skipped
    pub skipped_lines: usize,
}

/// Parse color code: a non-negative integer
fn color_code(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

/// Parse part reference: everything up to the next whitespace
fn part_reference(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

/// Parse the fields of a type-1 line after the leading "1":
/// color, 12 numeric fields (translation + 3x3 matrix), part reference
fn placement_fields(input: &str) -> IResult<&str, (u32, Vec<f32>, &str)> {
    tuple((
        preceded(terminated(char('1'), space1), terminated(color_code, space1)),
        count(terminated(float, space1), 12),
        part_reference,
    ))(input)
}

/// Parse one LDraw line
///
/// Returns `Ok(None)` for every line that is not a type-1 placement —
/// blanks, comments ("0 ..."), and other command types are valid non-error
/// states. Returns `Err` only for a type-1 line with too few tokens or
/// non-numeric fields.
pub fn parse_line(line: &str) -> Result<Option<Placement>> {
    let line = line.trim();
    if !line.starts_with("1 ") {
        return Ok(None);
    }

    let (_, (color, values, part_ref)) =
        placement_fields(line).map_err(|e| Error::malformed(format!("{line:?}: {e}")))?;

    let position = Vec3::new(values[0], values[1], values[2]);
    let mut matrix = [0.0f32; 9];
    matrix.copy_from_slice(&values[3..12]);

    Ok(Some(Placement {
        color,
        position,
        matrix,
        part_ref: part_ref.to_string(),
        dimensions: dimensions_for_part(part_ref),
    }))
}

/// Parse a whole LDraw document into a flat placement list
///
/// A bad line never aborts the rest of the document: malformed type-1
/// lines are logged and counted in the summary. Layer assignment happens
/// afterward, not here.
pub fn parse_document(text: &str) -> (Vec<Placement>, DocumentSummary) {
    let mut placements = Vec::new();
    let mut summary = DocumentSummary::default();

    for (idx, line) in text.lines().enumerate() {
        summary.line_count += 1;
        match parse_line(line) {
            Ok(Some(placement)) => {
                placements.push(placement);
                summary.parsed_parts += 1;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("skipping line {}: {}", idx + 1, err);
                summary.skipped_lines += 1;
            }
        }
    }

    tracing::debug!(
        "parsed {} lines, found {} parts ({} skipped)",
        summary.line_count,
        summary.parsed_parts,
        summary.skipped_lines
    );

    (placements, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BrickType;

    #[test]
    fn test_non_part_lines_are_skipped() {
        // Anything not starting with "1 " yields no record and no error
        for line in [
            "",
            "   ",
            "0 Test Model",
            "0 // comment",
            "0",
            "2 24 40 96 -20 -40 96 -20",
            "5 24 0 0 0 1 0 0",
            "not an ldraw line at all",
            "10 4 0 0 0",
        ] {
            assert_eq!(parse_line(line).unwrap(), None, "line: {line:?}");
        }
    }

    #[test]
    fn test_parse_part_line() {
        let line = "1 4 0 -24 10 1 0 0 0 1 0 0 0 1 3001.dat";
        let placement = parse_line(line).unwrap().unwrap();
        assert_eq!(placement.color, 4);
        assert_eq!(placement.position, Vec3::new(0.0, -24.0, 10.0));
        assert_eq!(
            placement.matrix,
            [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(placement.part_ref, "3001.dat");
        assert_eq!(placement.dimensions.brick_type, BrickType::Brick2x4);
    }

    #[test]
    fn test_parse_negative_and_float_fields() {
        let line = "1 14 -10.5 24 0.25 0 0 -1 0 1 0 1 0 0 3005.dat";
        let placement = parse_line(line).unwrap().unwrap();
        assert_eq!(placement.position, Vec3::new(-10.5, 24.0, 0.25));
        assert_eq!(placement.matrix[2], -1.0);
    }

    #[test]
    fn test_extra_whitespace_between_tokens() {
        let line = "  1   4  0 0 0   1 0 0 0 1 0 0 0 1   3001.dat  ";
        let placement = parse_line(line).unwrap().unwrap();
        assert_eq!(placement.color, 4);
        assert_eq!(placement.part_ref, "3001.dat");
    }

    #[test]
    fn test_malformed_lines_error() {
        // Too few tokens
        assert!(parse_line("1 4 0 0 0 1 0 0 0 1").is_err());
        // Missing part reference
        assert!(parse_line("1 4 0 0 0 1 0 0 0 1 0 0 0 1").is_err());
        // Non-numeric fields
        assert!(parse_line("1 4 0 zero 0 1 0 0 0 1 0 0 0 1 3001.dat").is_err());
        assert!(parse_line("1 red 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat").is_err());
    }

    #[test]
    fn test_unknown_part_falls_back() {
        let line = "1 4 0 0 0 1 0 0 0 1 0 0 0 1 mystery_part.dat";
        let placement = parse_line(line).unwrap().unwrap();
        assert_eq!(placement.dimensions.brick_type, BrickType::Brick2x4);
    }

    #[test]
    fn test_document_accumulates_and_skips() {
        let doc = "\
0 Test Model
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 bogus line that is malformed
1 14 0 24 0 1 0 0 0 1 0 0 0 1 3005.dat

2 24 40 96 -20 -40 96 -20
";
        let (placements, summary) = parse_document(doc);
        assert_eq!(placements.len(), 2);
        assert_eq!(summary.parsed_parts, 2);
        assert_eq!(summary.skipped_lines, 1);
        assert_eq!(summary.line_count, 6);
        assert_eq!(placements[0].color, 4);
        assert_eq!(placements[1].color, 14);
    }

    #[test]
    fn test_scenario_document() {
        let doc = "\
0 Test Model
1 4 0 0 0 1 0 0 0 1 0 0 0 1 3001.dat
1 14 0 24 0 1 0 0 0 1 0 0 0 1 3005.dat
";
        let (placements, _) = parse_document(doc);
        assert_eq!(placements.len(), 2);

        let dims = &placements[0].dimensions;
        assert_eq!((dims.width, dims.height, dims.depth), (40.0, 24.0, 80.0));
        let dims = &placements[1].dimensions;
        assert_eq!((dims.width, dims.height, dims.depth), (20.0, 24.0, 20.0));
    }
}
