// ABOUTME: Serializes the palette into the downloadable color token JSON document.
// ABOUTME: Clock-taking variants keep the generation timestamp deterministic in tests.

use crate::tokens::{BRAND_PALETTE, EXTENDED_PALETTE};
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde_json::json;

/// A generated token file, ready to hand to the platform as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFile {
    pub file_name: String,
    pub contents: String,
}

/// Pretty-printed `{ brand, extended, generated }` stamped with the current time.
pub fn serialize_palette() -> String {
    serialize_palette_at(Utc::now())
}

pub fn serialize_palette_at(now: DateTime<Utc>) -> String {
    let document = json!({
        "brand": BRAND_PALETTE,
        "extended": EXTENDED_PALETTE,
        "generated": now.to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    format!("{document:#}")
}

/// Build `<site>-color-tokens-<year>.json` for the given generation time.
pub fn token_file(site: &str, now: DateTime<Utc>) -> TokenFile {
    TokenFile {
        file_name: format!("{}-color-tokens-{}.json", site, now.year()),
        contents: serialize_palette_at(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&serialize_palette_at(now)).unwrap();
        assert_eq!(doc["generated"], "2025-03-14T09:26:53.000Z");
    }

    #[test]
    fn test_pretty_printed_with_two_space_indent() {
        let text = serialize_palette();
        assert!(text.starts_with("{\n  \""));
    }

    #[test]
    fn test_token_file_name_uses_year() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let file = token_file("oyatz", now);
        assert_eq!(file.file_name, "oyatz-color-tokens-2025.json");
        assert!(file.contents.contains("\"brand-500\""));
    }
}
