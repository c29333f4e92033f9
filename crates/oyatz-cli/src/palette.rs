// ABOUTME: Palette subcommands: token listing, contrast checks, JSON export and copy.
// ABOUTME: Renders swatches with truecolor escapes and routes files/clipboard through Platform.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::{ColoredString, Colorize};
use oyatz_palette::{
    best_text_rating, contrast_rating, find_token, parse_color, token_file, ColorToken,
    ContrastLevel, PaletteError, Rgb, TextTone, BRAND_PALETTE, EXTENDED_PALETTE,
};
use oyatz_platform::{Platform, TerminalPlatform};
use std::path::PathBuf;

pub fn print_list() {
    println!("{}", "Brand".bold());
    for token in &BRAND_PALETTE {
        println!("  {}", token_line(token));
    }
    println!();
    println!("{}", "Extended".bold());
    for token in &EXTENDED_PALETTE {
        println!("  {}", token_line(token));
    }
}

pub fn print_contrast(text: &str, background: &str) -> Result<()> {
    println!("{}", contrast_line(text, background)?);
    Ok(())
}

pub fn export(out: PathBuf, site: &str) -> Result<()> {
    let file = token_file(site, Utc::now());
    let platform = TerminalPlatform::new(out);
    platform
        .offer_download(&file.file_name, &file.contents)
        .with_context(|| {
            format!(
                "Failed to write {} to {}",
                file.file_name,
                platform.download_dir().display()
            )
        })?;
    Ok(())
}

pub fn copy(name: &str) -> Result<()> {
    let token = find_token(name).ok_or_else(|| PaletteError::UnknownToken(name.to_string()))?;
    let platform = TerminalPlatform::new(".");
    platform
        .copy_text(token.hex)
        .context("Failed to copy to clipboard")?;
    Ok(())
}

/// One swatch row: color block, name, hex and the badge for its best text color.
fn token_line(token: &ColorToken) -> String {
    let choice = best_text_rating(token.rgb);
    let tone = match choice.tone {
        TextTone::Dark => "dark text",
        TextTone::Light => "light text",
    };
    let label = match choice.rating.level.badge() {
        Some(label) => badge(choice.rating.level, label),
        None => "-".dimmed(),
    };
    format!(
        "{} {:14} {} {} {}",
        swatch(token.rgb),
        token.name,
        token.hex.dimmed(),
        label,
        format!("{} {:.2}:1", tone, choice.rating.ratio).dimmed()
    )
}

fn contrast_line(text: &str, background: &str) -> Result<String> {
    let fg = parse_color(text).with_context(|| format!("Unrecognized text color '{}'", text))?;
    let bg = parse_color(background)
        .with_context(|| format!("Unrecognized background color '{}'", background))?;
    let rating = contrast_rating(fg, bg);

    let verdict = match rating.level.badge() {
        Some(label) => badge(rating.level, label),
        None => "FAIL".red().bold(),
    };
    let sample = " Aa "
        .truecolor(fg.r, fg.g, fg.b)
        .on_truecolor(bg.r, bg.g, bg.b);
    Ok(format!(
        "{} {} on {}  {:.2}:1  {}",
        sample,
        fg.to_hex(),
        bg.to_hex(),
        rating.ratio,
        verdict
    ))
}

fn swatch(rgb: Rgb) -> ColoredString {
    "    ".on_truecolor(rgb.r, rgb.g, rgb.b)
}

fn badge(level: ContrastLevel, label: &str) -> ColoredString {
    match level {
        ContrastLevel::Aaa => label.green().bold(),
        ContrastLevel::Aa => label.yellow().bold(),
        ContrastLevel::Fail => label.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_token_line_shows_badge() {
        plain();
        let line = token_line(find_token("brand-900").unwrap());
        assert!(line.contains("brand-900"));
        assert!(line.contains("#482420"));
        assert!(line.contains("AAA"));
        assert!(line.contains("light text"));
    }

    #[test]
    fn test_contrast_line_accepts_hex_and_tokens() {
        plain();
        let line = contrast_line("#ffffff", "brand-900").unwrap();
        assert!(line.contains("#ffffff on #482420"));
        assert!(line.ends_with("AAA"));

        let line = contrast_line("brand-50", "brand-100").unwrap();
        assert!(line.ends_with("FAIL"));
    }

    #[test]
    fn test_contrast_line_rejects_unknown() {
        let err = contrast_line("mauve-ish", "#000").unwrap_err();
        assert!(err.to_string().contains("mauve-ish"));
    }

    #[test]
    fn test_export_writes_token_file() {
        let dir = tempfile::tempdir().unwrap();
        export(dir.path().to_path_buf(), "oyatz").unwrap();

        let name = format!("oyatz-color-tokens-{}.json", chrono::Datelike::year(&Utc::now()));
        let contents = std::fs::read_to_string(dir.path().join(name)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["brand"].as_array().unwrap().len(), 10);
        assert_eq!(json["extended"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_copy_unknown_token() {
        assert!(copy("not-a-token").is_err());
    }
}
