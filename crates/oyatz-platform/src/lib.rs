// ABOUTME: Platform capability interface used by the palette and booking logic.
// ABOUTME: Abstracts navigation, downloads, clipboard and the dialog-closed signal.

mod terminal;

pub use terminal::TerminalPlatform;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    /// The platform has no way to perform this action.
    #[error("Unsupported platform action: {0}")]
    Unsupported(&'static str),

    /// IO error while writing a download or to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Everything the site logic needs from its host environment.
///
/// A browser host maps these onto `window.location`, a synthetic download
/// link and the clipboard API; the terminal host prints and writes files.
pub trait Platform {
    /// Navigate to a URL. For `mailto:` this hands the message to the mail client,
    /// whose outcome is not observable.
    fn open_url(&self, url: &str) -> Result<()>;

    /// Offer `contents` to the user as a file named `file_name`.
    fn offer_download(&self, file_name: &str, contents: &str) -> Result<()>;

    /// Put `text` on the clipboard.
    fn copy_text(&self, text: &str) -> Result<()>;

    /// The booking dialog was dismissed.
    fn dialog_closed(&self);
}

impl<P: Platform + ?Sized> Platform for &P {
    fn open_url(&self, url: &str) -> Result<()> {
        (**self).open_url(url)
    }

    fn offer_download(&self, file_name: &str, contents: &str) -> Result<()> {
        (**self).offer_download(file_name, contents)
    }

    fn copy_text(&self, text: &str) -> Result<()> {
        (**self).copy_text(text)
    }

    fn dialog_closed(&self) {
        (**self).dialog_closed()
    }
}
