// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LDraw color table
//!
//! Maps numeric LDraw color codes to displayable RGB values. The table is
//! a fixed match over the palette the viewer supports; unknown codes fall
//! back to a neutral gray rather than failing the placement.

/// Displayable RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);

    /// Build from a packed 0xRRGGBB value
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Pack into a 0xRRGGBB value
    #[inline]
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Linear interpolation toward `other`, `t` clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// Fallback for color codes outside the table
pub const DEFAULT_COLOR: Rgb = Rgb::from_hex(0xCCCCCC);

/// Look up the display color for an LDraw color code
///
/// Unknown codes resolve to [`DEFAULT_COLOR`]; lookup never fails.
pub fn rgb_for_code(code: u32) -> Rgb {
    let hex = match code {
        0 => 0x000000,  // Black
        1 => 0x0055BF,  // Blue
        2 => 0x00852B,  // Green
        3 => 0x009A4E,  // Dark Turquoise
        4 => 0xD01012,  // Red
        5 => 0xF5C518,  // Yellow
        6 => 0x02838F,  // Teal
        7 => 0xD67572,  // Pink
        8 => 0x8E5597,  // Purple
        9 => 0x57615B,  // Dark Gray
        10 => 0xF17626, // Orange
        11 => 0x9DC9CA, // Light Turquoise
        14 => 0xEEEEEE, // White
        15 => 0x6B5A5A, // Brown
        16 => 0xD3BB4C, // Medium Nougat
        17 => 0x0E3E9A, // Dark Blue
        18 => 0x069D9F, // Dark Turquoise
        19 => 0x058547, // Dark Green
        20 => 0x802E41, // Dark Pink
        21 => 0xA5371F, // Dark Red
        22 => 0x8C5C20, // Dark Brown
        23 => 0x9BA19D, // Medium Gray
        24 => 0xCDCDCD, // Light Gray
        25 => 0xA06EB9, // Lavender
        26 => 0xE4ADC8, // Light Pink
        27 => 0xD67240, // Medium Orange
        28 => 0xF3CF9B, // Tan
        29 => 0xBDC6AD, // Light Green
        36 => 0xE4CD9E, // Bright Green
        _ => return DEFAULT_COLOR,
    };
    Rgb::from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(rgb_for_code(4).to_hex(), 0xD01012);
        assert_eq!(rgb_for_code(14).to_hex(), 0xEEEEEE);
        assert_eq!(rgb_for_code(0), Rgb::BLACK);
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(rgb_for_code(12), DEFAULT_COLOR);
        assert_eq!(rgb_for_code(9999), DEFAULT_COLOR);
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Rgb::from_hex(0x0055BF);
        assert_eq!((c.r, c.g, c.b), (0x00, 0x55, 0xBF));
        assert_eq!(c.to_hex(), 0x0055BF);
    }

    #[test]
    fn test_lerp() {
        let mid = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (128, 128, 128));

        // Endpoints are exact
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);

        // Out-of-range factors clamp
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 2.0), Rgb::WHITE);
    }
}
