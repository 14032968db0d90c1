//! Format detection from a bounded lookahead window

use crate::error::DetectError;
use biolib_core::SequenceFormat;
use std::io::BufRead;
use std::path::Path;

/// Default number of bytes inspected when detecting a stream's format
pub const LOOKAHEAD_WINDOW: usize = 8 * 1024;

/// Phred+33 (Sanger / Illumina 1.8+)
pub const DEFAULT_PHRED_OFFSET: u8 = 33;

/// Record layout rules for one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub format: SequenceFormat,
    pub header_marker: u8,
    /// Quality separator line marker; FASTQ only
    pub separator_marker: Option<u8>,
    pub phred_offset: u8,
}

impl FormatDescriptor {
    pub fn fasta() -> Self {
        Self::for_format(SequenceFormat::Fasta)
    }

    pub fn fastq() -> Self {
        Self::for_format(SequenceFormat::Fastq)
    }

    pub fn for_format(format: SequenceFormat) -> Self {
        Self {
            format,
            header_marker: format.header_marker(),
            separator_marker: format.carries_quality().then_some(b'+'),
            phred_offset: DEFAULT_PHRED_OFFSET,
        }
    }

    pub fn with_phred_offset(mut self, offset: u8) -> Self {
        self.phred_offset = offset;
        self
    }
}

/// Identify the format from the first non-whitespace byte of `lookahead`.
///
/// Only the first [`LOOKAHEAD_WINDOW`] bytes are inspected.
pub fn detect(lookahead: &[u8]) -> Result<FormatDescriptor, DetectError> {
    detect_within(lookahead, LOOKAHEAD_WINDOW)
}

fn detect_within(lookahead: &[u8], window: usize) -> Result<FormatDescriptor, DetectError> {
    let limit = lookahead.len().min(window);
    let first = lookahead[..limit]
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace());

    match first {
        Some(b'>') => Ok(FormatDescriptor::fasta()),
        Some(b'@') => Ok(FormatDescriptor::fastq()),
        found => Err(DetectError::UnrecognizedFormat { found, window }),
    }
}

/// Detect the format of a buffered reader without consuming any input.
///
/// The reader's buffer is peeked with `fill_buf`, so at most one buffer's
/// worth of data (capped at `window`) is examined and the same reader can be
/// handed to the parser afterwards.
pub fn detect_reader<R: BufRead + ?Sized>(
    reader: &mut R,
    window: usize,
) -> Result<FormatDescriptor, DetectError> {
    let buf = reader.fill_buf()?;
    detect_within(buf, window)
}

/// Guess the format from a file extension, looking through a trailing `.gz`
pub fn detect_path_hint(path: &Path) -> Option<FormatDescriptor> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let ext = Path::new(name).extension()?.to_str()?;

    match ext {
        "fa" | "fasta" | "fna" | "faa" | "ffn" | "frn" => Some(FormatDescriptor::fasta()),
        "fq" | "fastq" => Some(FormatDescriptor::fastq()),
        _ => None,
    }
}
