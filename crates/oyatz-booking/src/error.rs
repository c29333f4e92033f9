// ABOUTME: Error types for oyatz-booking.
// ABOUTME: Defines BookingError covering config, HTTP, relay rejection, platform and IO failures.

use thiserror::Error;

/// Error types for the booking flow and its transports.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Configuration loading or validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP client failure talking to the relay.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered but did not accept the message.
    #[error("Relay rejected message (status {status}): {message}")]
    Relay { status: u16, message: String },

    /// The host platform could not perform an action (e.g. opening the mail client).
    #[error("Platform error: {0}")]
    Platform(#[from] oyatz_platform::PlatformError),

    /// IO error for file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using BookingError.
pub type Result<T> = std::result::Result<T, BookingError>;
