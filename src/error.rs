use std::io;
use thiserror::Error;

/// Custom error type for the Energize application
#[derive(Error, Debug)]
pub enum EnergizeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Report error: {0}")]
    Report(String),
}

/// Result type alias for the Energize application
pub type Result<T> = std::result::Result<T, EnergizeError>;

impl EnergizeError {
    /// Create a report error
    pub fn report<S: Into<String>>(msg: S) -> Self {
        EnergizeError::Report(msg.into())
    }
}
