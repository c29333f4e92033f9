// ABOUTME: Library root for oyatz-palette.
// ABOUTME: Exports color, contrast, tokens, export and error modules.

pub mod color;
pub mod contrast;
pub mod error;
pub mod export;
pub mod tokens;

pub use color::{luminance, Rgb};
pub use contrast::{
    best_text_rating, contrast_rating, contrast_ratio, is_light, ContrastLevel, ContrastRating,
    TextChoice, TextTone,
};
pub use error::{PaletteError, Result};
pub use export::{serialize_palette, serialize_palette_at, token_file, TokenFile};
pub use tokens::{find_token, parse_color, ColorToken, BRAND_PALETTE, EXTENDED_PALETTE};
