// ABOUTME: The fixed brand ramp and extended palette used across the site.
// ABOUTME: Tokens derive their rgb from the hex literal at compile time.

use crate::color::Rgb;
use crate::error::{PaletteError, Result};
use serde::Serialize;

/// A named palette entry. `rgb` is always the decomposition of `hex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    pub name: &'static str,
    pub hex: &'static str,
    pub rgb: Rgb,
}

impl ColorToken {
    pub const fn new(name: &'static str, hex: &'static str) -> Self {
        Self {
            name,
            hex,
            rgb: Rgb::from_hex_literal(hex),
        }
    }
}

pub static BRAND_PALETTE: [ColorToken; 10] = [
    ColorToken::new("brand-50", "#f5f0ed"),
    ColorToken::new("brand-100", "#ead9d1"),
    ColorToken::new("brand-200", "#d5b3a3"),
    ColorToken::new("brand-300", "#c08d75"),
    ColorToken::new("brand-400", "#ab6757"),
    // Pantone 17-1230 Mocha Mousse
    ColorToken::new("brand-500", "#a47864"),
    ColorToken::new("brand-600", "#8d6353"),
    ColorToken::new("brand-700", "#764e42"),
    ColorToken::new("brand-800", "#5f3931"),
    ColorToken::new("brand-900", "#482420"),
];

pub static EXTENDED_PALETTE: [ColorToken; 6] = [
    ColorToken::new("honey-blonde", "#f4d03f"),
    ColorToken::new("auburn", "#a0522d"),
    ColorToken::new("chocolate", "#7b3f00"),
    ColorToken::new("caramel", "#d2691e"),
    ColorToken::new("platinum", "#e5e4e2"),
    ColorToken::new("rose-gold", "#e8b4b8"),
];

/// Look a token up by name in the brand ramp, then the extended palette.
pub fn find_token(name: &str) -> Option<&'static ColorToken> {
    BRAND_PALETTE
        .iter()
        .chain(EXTENDED_PALETTE.iter())
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolve user input that is either a token name or a hex color.
pub fn parse_color(input: &str) -> Result<Rgb> {
    if let Some(token) = find_token(input) {
        return Ok(token.rgb);
    }
    let trimmed = input.trim();
    if trimmed.starts_with('#') || trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Rgb::from_hex(trimmed);
    }
    Err(PaletteError::UnknownToken(trimmed.to_string()))
}
