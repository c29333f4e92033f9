// ABOUTME: WCAG contrast ratio, normal-text pass/fail tiers and the swatch badge rule.
// ABOUTME: All functions are pure; ratings are derived on demand and never stored.

use crate::color::{Rgb, INK, WHITE};
use serde::Serialize;
use std::fmt;

/// WCAG tier for normal-weight text.
///
/// Large text uses 3:1 / 4.5:1 cutoffs; those are not modeled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ContrastLevel {
    #[serde(rename = "fail")]
    Fail,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl ContrastLevel {
    pub const AAA_MIN: f64 = 7.0;
    pub const AA_MIN: f64 = 4.5;

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= Self::AAA_MIN {
            Self::Aaa
        } else if ratio >= Self::AA_MIN {
            Self::Aa
        } else {
            Self::Fail
        }
    }

    pub fn passes(self) -> bool {
        self != Self::Fail
    }

    /// Label shown on a swatch badge. Failing colors get no badge.
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Self::Aaa => Some("AAA"),
            Self::Aa => Some("AA"),
            Self::Fail => None,
        }
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Fail => "fail",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastRating {
    pub level: ContrastLevel,
    pub ratio: f64,
}

/// `(lighter + 0.05) / (darker + 0.05)`. Symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast_rating(text: Rgb, background: Rgb) -> ContrastRating {
    let ratio = contrast_ratio(text, background);
    ContrastRating {
        level: ContrastLevel::from_ratio(ratio),
        ratio,
    }
}

/// True when the color reads as light, i.e. wants dark text on top.
pub fn is_light(color: Rgb) -> bool {
    color.luminance() > 0.5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    Dark,
    Light,
}

impl TextTone {
    pub fn color(self) -> Rgb {
        match self {
            Self::Dark => INK,
            Self::Light => WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextChoice {
    pub tone: TextTone,
    pub rating: ContrastRating,
}

/// Rate dark and light text on `background` and keep the one a swatch badge should show.
///
/// Dark wins when it reaches AAA, or when it passes and light fails. Otherwise light
/// wins when it passes. With neither passing the light rating is reported.
pub fn best_text_rating(background: Rgb) -> TextChoice {
    let dark = contrast_rating(INK, background);
    let light = contrast_rating(WHITE, background);

    let tone = if dark.level == ContrastLevel::Aaa || (dark.level.passes() && !light.level.passes())
    {
        TextTone::Dark
    } else if light.level.passes() || !dark.level.passes() {
        TextTone::Light
    } else {
        TextTone::Dark
    };

    let rating = match tone {
        TextTone::Dark => dark,
        TextTone::Light => light,
    };
    TextChoice { tone, rating }
}
