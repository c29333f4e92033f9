// ABOUTME: CLI entry point for the oyatz site tools.
// ABOUTME: Dispatches to palette (list, contrast, export, copy) and book subcommands.

mod book;
mod palette;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oyatz")]
#[command(about = "Color tokens and booking requests for the OYATZ Hair site")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Palette commands
    #[command(subcommand)]
    Palette(PaletteCommands),

    /// Send a booking request
    Book(book::BookArgs),
}

#[derive(Subcommand)]
enum PaletteCommands {
    /// Show every token with its best text color and contrast badge
    List,

    /// Rate text on a background (token names or hex)
    Contrast {
        /// Text color, e.g. "#ffffff" or "brand-50"
        text: String,

        /// Background color, e.g. "brand-900"
        background: String,
    },

    /// Write the color token JSON file
    Export {
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Site name used as the file prefix
        #[arg(long, default_value = "oyatz")]
        site: String,
    },

    /// Copy a token's hex value to the clipboard
    Copy {
        /// Token name, e.g. "brand-500"
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    oyatz_log::init_for(&["oyatz_cli", "oyatz_booking", "oyatz_platform"]);

    let cli = Cli::parse();

    match cli.command {
        Commands::Palette(cmd) => run_palette(cmd),
        Commands::Book(args) => book::run(args).await,
    }
}

fn run_palette(cmd: PaletteCommands) -> Result<()> {
    match cmd {
        PaletteCommands::List => {
            palette::print_list();
            Ok(())
        }
        PaletteCommands::Contrast { text, background } => {
            palette::print_contrast(&text, &background)
        }
        PaletteCommands::Export { out, site } => palette::export(out, &site),
        PaletteCommands::Copy { token } => palette::copy(&token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_palette_contrast() {
        let cli = Cli::try_parse_from(["oyatz", "palette", "contrast", "white", "brand-900"])
            .unwrap();
        match cli.command {
            Commands::Palette(PaletteCommands::Contrast { text, background }) => {
                assert_eq!(text, "white");
                assert_eq!(background, "brand-900");
            }
            _ => panic!("expected palette contrast"),
        }
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::try_parse_from(["oyatz", "palette", "export"]).unwrap();
        match cli.command {
            Commands::Palette(PaletteCommands::Export { out, site }) => {
                assert_eq!(out, PathBuf::from("."));
                assert_eq!(site, "oyatz");
            }
            _ => panic!("expected palette export"),
        }
    }

    #[test]
    fn test_parse_book_repeated_flags() {
        let cli = Cli::try_parse_from([
            "oyatz",
            "book",
            "--name",
            "Ada",
            "--service",
            "braids",
            "--service",
            "locks",
            "--time",
            "9:00 AM",
            "--day",
            "sun",
        ])
        .unwrap();
        match cli.command {
            Commands::Book(args) => {
                assert_eq!(args.name, "Ada");
                assert_eq!(args.services, vec!["braids", "locks"]);
                assert_eq!(args.times, vec!["9:00 AM"]);
                assert_eq!(args.day.as_deref(), Some("sun"));
            }
            _ => panic!("expected book"),
        }
    }
}
