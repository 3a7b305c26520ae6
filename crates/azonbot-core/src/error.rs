//! Error taxonomy. Directory and Telegram failures are recoverable at their
//! call sites; Config errors are raised only during startup validation.

use thiserror::Error;

/// All errors produced by Azonbot crates.
#[derive(Error, Debug)]
pub enum AzonError {
    /// Invalid or missing configuration. Fatal at startup, never raised
    /// while the loops are running.
    #[error("Config error: {0}")]
    Config(String),

    /// The subscriber directory could not be reached or answered with a
    /// non-success status. The caller retries on its next poll tick.
    #[error("Directory unavailable: {0}")]
    Directory(String),

    /// A single Telegram delivery failed. Swallowed per recipient.
    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AzonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = AzonError::Directory("connection refused".into());
        assert_eq!(e.to_string(), "Directory unavailable: connection refused");

        let e = AzonError::Config("missing bot_token".into());
        assert!(e.to_string().contains("missing bot_token"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: AzonError = io.into();
        assert!(matches!(e, AzonError::Io(_)));
    }
}
