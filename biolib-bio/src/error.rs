//! Per-component error types for the record engine
//!
//! Format detection failures are fatal for a stream; parse and write errors
//! describe one record and leave the stream usable.

use biolib_core::{BiolibError, SequenceFormat};
use thiserror::Error;

/// Detection could not identify the input format
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("no FASTA ('>') or FASTQ ('@') record marker in the first {window} bytes{}", describe_found(.found))]
    UnrecognizedFormat { found: Option<u8>, window: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn as_char(b: &u8) -> char {
    *b as char
}

fn describe_found(found: &Option<u8>) -> String {
    match found {
        Some(b) if b.is_ascii_graphic() => format!(" (found '{}')", *b as char),
        Some(b) => format!(" (found byte 0x{:02x})", b),
        None => " (no data before end of window)".to_string(),
    }
}

/// What went wrong with one record unit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected '{}' at start of record", as_char(.marker))]
    MissingHeader { marker: u8 },

    #[error("record header has an empty identifier")]
    EmptyIdentifier,

    #[error("expected '+' separator line after sequence")]
    MissingSeparator,

    #[error("sequence length ({sequence}) != quality length ({quality})")]
    QualityLengthMismatch { sequence: usize, quality: usize },

    #[error("quality byte 0x{byte:02x} at position {position} is outside the encodable range")]
    InvalidQuality { position: usize, byte: u8 },

    #[error("record header is not valid UTF-8")]
    InvalidEncoding,

    /// The stream or the next record began before the unit was complete
    #[error("record ended before its {expected}")]
    Truncated { expected: &'static str },

    #[error("read failed: {0}")]
    Io(String),
}

/// A malformed record unit, located in the stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("record {index} at byte {offset} (line {line}): {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 0-based ordinal of the unit among all units in the stream
    pub index: usize,
    /// Byte offset of the first byte of the unit
    pub offset: u64,
    /// 1-based line number of the first line of the unit
    pub line: usize,
}

impl ParseError {
    pub fn is_io(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Io(_))
    }
}

/// Record construction rejected its inputs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("sequence length ({sequence}) != quality length ({quality})")]
    QualityLengthMismatch { sequence: usize, quality: usize },
}

/// A record could not be written
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("record '{id}' has no quality scores and cannot be written as {format}")]
    UnsupportedConversion { id: String, format: SequenceFormat },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A taxonomy file line could not be accepted
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("line {line}: invalid taxonomy string: {taxonomy}")]
    InvalidTaxonomy { line: usize, taxonomy: String },

    #[error("line {line}: expected '<id>\\t<taxonomy>'")]
    MissingTaxonomy { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DetectError> for BiolibError {
    fn from(err: DetectError) -> Self {
        match err {
            DetectError::Io(e) => BiolibError::Io(e),
            other => BiolibError::UnrecognizedFormat(other.to_string()),
        }
    }
}

impl From<ParseError> for BiolibError {
    fn from(err: ParseError) -> Self {
        if err.is_io() {
            BiolibError::Io(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
        } else {
            BiolibError::Parse(err.to_string())
        }
    }
}

impl From<RecordError> for BiolibError {
    fn from(err: RecordError) -> Self {
        BiolibError::InvalidInput(err.to_string())
    }
}

impl From<TaxonomyError> for BiolibError {
    fn from(err: TaxonomyError) -> Self {
        match err {
            TaxonomyError::Io(e) => BiolibError::Io(e),
            other => BiolibError::InvalidInput(other.to_string()),
        }
    }
}

impl From<WriteError> for BiolibError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Io(e) => BiolibError::Io(e),
            other => BiolibError::UnsupportedConversion(other.to_string()),
        }
    }
}
