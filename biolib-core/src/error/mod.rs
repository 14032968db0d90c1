//! Core error types for biolib

use thiserror::Error;

/// Main error type for biolib operations
///
/// Per-record failures (parse errors, unsupported conversions) have their own
/// types in `biolib-bio` and are only folded into this enum when a caller
/// decides a record-level problem should abort the whole run.
#[derive(Error, Debug)]
pub enum BiolibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unrecognized format: {0}")]
    UnrecognizedFormat(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Unsupported conversion: {0}")]
    UnsupportedConversion(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for biolib operations
pub type BiolibResult<T> = Result<T, BiolibError>;

impl BiolibError {
    /// Process exit code the command-line front end uses for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BiolibError::Configuration(_) => 2,
            BiolibError::Io(_) => 3,
            BiolibError::Parse(_) => 4,
            BiolibError::UnrecognizedFormat(_) => 5,
            BiolibError::UnsupportedConversion(_) => 6,
            _ => 1,
        }
    }
}

// Conversion implementations for common error types
impl From<serde_json::Error> for BiolibError {
    fn from(err: serde_json::Error) -> Self {
        BiolibError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for BiolibError {
    fn from(err: anyhow::Error) -> Self {
        BiolibError::Other(err.to_string())
    }
}
