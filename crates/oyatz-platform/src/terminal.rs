// ABOUTME: Terminal implementation of Platform for the oyatz CLI.
// ABOUTME: Prints URLs, writes downloads to a directory and copies via the OSC 52 escape.

use crate::{Platform, Result};
use base64::Engine as _;
use colored::Colorize;
use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Host environment for a terminal session.
pub struct TerminalPlatform<W: Write = std::io::Stdout> {
    download_dir: PathBuf,
    out: RefCell<W>,
}

impl TerminalPlatform {
    /// Write downloads into `download_dir`, print everything else to stdout.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self::with_writer(download_dir, std::io::stdout())
    }
}

impl<W: Write> TerminalPlatform<W> {
    pub fn with_writer(download_dir: impl Into<PathBuf>, out: W) -> Self {
        Self {
            download_dir: download_dir.into(),
            out: RefCell::new(out),
        }
    }

    pub fn download_dir(&self) -> &PathBuf {
        &self.download_dir
    }

    /// Take the writer back, e.g. to inspect captured output.
    pub fn into_writer(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Platform for TerminalPlatform<W> {
    fn open_url(&self, url: &str) -> Result<()> {
        info!(scheme = url.split(':').next().unwrap_or_default(), "Opening URL");
        let mut out = self.out.borrow_mut();
        writeln!(out, "{} Open this link to continue:", "→".cyan().bold())?;
        writeln!(out, "  {}", url)?;
        Ok(())
    }

    fn offer_download(&self, file_name: &str, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(file_name);
        std::fs::write(&path, contents)?;
        info!(path = %path.display(), bytes = contents.len(), "Saved download");
        writeln!(
            self.out.borrow_mut(),
            "{} Saved {}",
            "✓".green().bold(),
            path.display()
        )?;
        Ok(())
    }

    fn copy_text(&self, text: &str) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut out = self.out.borrow_mut();
        // OSC 52: terminals that support it place the payload on the system clipboard
        write!(out, "\x1b]52;c;{}\x07", encoded)?;
        writeln!(out, "{} Copied {}", "✓".green().bold(), text)?;
        out.flush()?;
        debug!(len = text.len(), "Copied text to clipboard");
        Ok(())
    }

    fn dialog_closed(&self) {
        debug!("Booking dialog closed");
    }
}
