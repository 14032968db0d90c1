//! File and stdio plumbing with transparent gzip support

use crate::error::DetectError;
use crate::formats::detect::{
    detect_path_hint, detect_reader, FormatDescriptor, DEFAULT_PHRED_OFFSET, LOOKAHEAD_WINDOW,
};
use crate::formats::parser::RecordParser;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Path that stands for stdin or stdout
pub const STDIO_PATH: &str = "-";

pub type InputReader = Box<dyn BufRead + Send>;
pub type OutputWriter = Box<dyn Write + Send>;

/// Settings for opening a record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub phred_offset: u8,
    pub lookahead: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            phred_offset: DEFAULT_PHRED_OFFSET,
            lookahead: LOOKAHEAD_WINDOW,
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Open a file (or `-` for stdin) for buffered reading.
///
/// Gzip input is recognised by its magic bytes, not its extension.
pub fn open_input(path: &Path) -> io::Result<InputReader> {
    let mut reader: InputReader = if is_stdio(path) {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };

    let compressed = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if compressed {
        debug!("reading gzip-compressed input from {}", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(reader)
    }
}

/// Create an output file (or `-` for stdout); `.gz` paths are compressed
pub fn create_output(path: &Path) -> io::Result<OutputWriter> {
    if is_stdio(path) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }

    let file = File::create(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let encoder = GzEncoder::new(file, Compression::default());
        Ok(Box::new(BufWriter::new(encoder)))
    } else {
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Open a file and return a parser for its records.
///
/// The format is detected from content. An empty stream falls back to the
/// extension hint (FASTA when there is none) and yields no records. Anything
/// else without a record marker in the lookahead window, whitespace included,
/// is an error.
pub fn open_records(
    path: &Path,
    options: &ReadOptions,
) -> Result<RecordParser<InputReader>, DetectError> {
    let mut reader = open_input(path)?;

    let descriptor = if reader.fill_buf()?.is_empty() {
        let fallback = detect_path_hint(path).unwrap_or_else(FormatDescriptor::fasta);
        debug!("{} is empty, assuming {}", path.display(), fallback.format);
        fallback
    } else {
        detect_reader(&mut reader, options.lookahead)?
    };
    let descriptor = descriptor.with_phred_offset(options.phred_offset);

    debug!("parsing {} as {}", path.display(), descriptor.format);
    Ok(RecordParser::new(reader, descriptor))
}

/// [`open_records`] with default options
pub fn parse_path(path: &Path) -> Result<RecordParser<InputReader>, DetectError> {
    open_records(path, &ReadOptions::default())
}
