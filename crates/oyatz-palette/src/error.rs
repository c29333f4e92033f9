// ABOUTME: Error types for oyatz-palette.
// ABOUTME: Defines PaletteError covering malformed hex strings and unknown token names.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Input was not a 6-digit RGB hex string.
    #[error("Invalid hex color '{0}': expected #rrggbb")]
    InvalidHex(String),

    /// No brand or extended token carries this name.
    #[error("Unknown color token '{0}'")]
    UnknownToken(String),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
