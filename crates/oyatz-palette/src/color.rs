// ABOUTME: RGB color value, hex conversion and WCAG 2.1 relative luminance.
// ABOUTME: Luminance takes raw channel numbers so out-of-range input is not clamped.

use crate::error::{PaletteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Near-black used for dark text on swatches (#0b0b0c).
pub const INK: Rgb = Rgb::new(11, 11, 12);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let bytes = digits.as_bytes();
        if bytes.len() != 6 {
            return Err(PaletteError::InvalidHex(input.to_string()));
        }

        let mut channels = [0u8; 3];
        for (i, pair) in bytes.chunks_exact(2).enumerate() {
            match (hex_value(pair[0]), hex_value(pair[1])) {
                (Some(hi), Some(lo)) => channels[i] = hi << 4 | lo,
                _ => return Err(PaletteError::InvalidHex(input.to_string())),
            }
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Parse a literal known at compile time. Panics during const evaluation on bad input.
    pub(crate) const fn from_hex_literal(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        assert!(bytes.len() == 7 && bytes[0] == b'#', "hex literal must be #rrggbb");
        Self::new(
            literal_pair(bytes[1], bytes[2]),
            literal_pair(bytes[3], bytes[4]),
            literal_pair(bytes[5], bytes[6]),
        )
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance of this color.
    pub fn luminance(self) -> f64 {
        luminance(self.r as f64, self.g as f64, self.b as f64)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

const fn literal_pair(hi: u8, lo: u8) -> u8 {
    match (hex_value(hi), hex_value(lo)) {
        (Some(hi), Some(lo)) => hi << 4 | lo,
        _ => panic!("hex literal contains a non-hex digit"),
    }
}

/// Linearize one channel already scaled to [0, 1].
fn linearize(v: f64) -> f64 {
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.1 relative luminance from 0-255 channel values.
///
/// Channels outside [0, 255] are not validated; they produce a luminance
/// outside [0, 1].
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    let rs = linearize(r / 255.0);
    let gs = linearize(g / 255.0);
    let bs = linearize(b / 255.0);
    0.2126 * rs + 0.7152 * gs + 0.0722 * bs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#482420").unwrap(), Rgb::new(72, 36, 32));
        assert_eq!(Rgb::from_hex("482420").unwrap(), Rgb::new(72, 36, 32));
        assert_eq!(Rgb::from_hex("#F5F0ED").unwrap(), Rgb::new(245, 240, 237));
        assert_eq!(Rgb::from_hex("  #ffffff ").unwrap(), WHITE);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "#fff", "#gggggg", "#1234567", "12345", "#12 456"] {
            let err = Rgb::from_hex(bad).unwrap_err();
            assert!(matches!(err, PaletteError::InvalidHex(_)), "{bad}");
        }
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(Rgb::new(0xAB, 0x67, 0x57).to_hex(), "#ab6757");
        assert_eq!(INK.to_string(), "#0b0b0c");
    }

    #[test]
    fn test_literal_matches_runtime_parse() {
        const C: Rgb = Rgb::from_hex_literal("#d2691e");
        assert_eq!(C, Rgb::from_hex("#d2691e").unwrap());
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0.0, 0.0, 0.0), 0.0);
        assert!((luminance(255.0, 255.0, 255.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_linear_segment_below_breakpoint() {
        // 10/255 = 0.0392..., just under the 0.03928 breakpoint
        let v = 10.0 / 255.0;
        let expected = 0.2126 * (v / 12.92);
        assert_eq!(luminance(10.0, 0.0, 0.0), expected);
    }

    #[test]
    fn test_luminance_green_dominates() {
        let red = luminance(128.0, 0.0, 0.0);
        let green = luminance(0.0, 128.0, 0.0);
        let blue = luminance(0.0, 0.0, 128.0);
        assert!(green > red);
        assert!(red > blue);
    }

    #[test]
    fn test_luminance_out_of_range_propagates() {
        assert!(luminance(300.0, 300.0, 300.0) > 1.0);
        assert!(luminance(-40.0, 0.0, 0.0) < 0.0);
    }
}
