//! Streaming FASTA/FASTQ record parser
//!
//! The parser pulls one line at a time from a [`BufRead`] and yields one
//! `Result` per record unit. A malformed unit produces an error and the parser
//! resynchronises at the next line that starts with the header marker, so one
//! bad record never hides the rest of the stream.

use crate::error::{ParseError, ParseErrorKind};
use crate::formats::detect::FormatDescriptor;
use crate::sequence::SequenceRecord;
use biolib_core::SequenceFormat;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::space1,
    combinator::{opt, rest},
    sequence::preceded,
    IResult,
};
use std::io::{self, BufRead};
use tracing::trace;

/// One input line with its terminator stripped
struct Line {
    bytes: Vec<u8>,
    offset: u64,
    number: usize,
    terminated: bool,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.bytes.iter().all(u8::is_ascii_whitespace)
    }

    fn starts_with(&self, marker: u8) -> bool {
        self.bytes.first() == Some(&marker)
    }
}

/// Split a header line into identifier and optional description
fn header_fields(marker: u8, input: &[u8]) -> IResult<&[u8], (&[u8], Option<&[u8]>)> {
    let marker = [marker];
    let (input, _) = tag(&marker[..])(input)?;
    let (input, id) = take_till(|c: u8| c.is_ascii_whitespace())(input)?;
    let (input, description) = opt(preceded(space1, rest))(input)?;
    Ok((input, (id, description)))
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

fn io_kind(err: io::Error) -> ParseErrorKind {
    ParseErrorKind::Io(err.to_string())
}

/// Decode printable quality characters into Phred scores
fn decode_quality(encoded: &[u8], phred_offset: u8) -> Result<Vec<u8>, ParseErrorKind> {
    encoded
        .iter()
        .enumerate()
        .map(|(position, &byte)| {
            if byte < phred_offset || byte > b'~' {
                Err(ParseErrorKind::InvalidQuality { position, byte })
            } else {
                Ok(byte - phred_offset)
            }
        })
        .collect()
}

/// Lazy, forward-only iterator over the records of one stream
pub struct RecordParser<R> {
    reader: R,
    descriptor: FormatDescriptor,
    /// A header line read while finishing the previous unit
    pending: Option<Line>,
    offset: u64,
    line: usize,
    index: usize,
    done: bool,
}

impl<R: BufRead> RecordParser<R> {
    pub fn new(reader: R, descriptor: FormatDescriptor) -> Self {
        Self {
            reader,
            descriptor,
            pending: None,
            offset: 0,
            line: 0,
            index: 0,
            done: false,
        }
    }

    pub fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    /// Record units (good or bad) produced so far
    pub fn units_seen(&self) -> usize {
        self.index
    }

    /// Bytes consumed from the reader so far
    pub fn bytes_read(&self) -> u64 {
        self.offset
    }

    fn read_line(&mut self) -> io::Result<Option<Line>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        let mut bytes = Vec::new();
        let n = self.reader.read_until(b'\n', &mut bytes)?;
        if n == 0 {
            return Ok(None);
        }

        let offset = self.offset;
        self.offset += n as u64;
        self.line += 1;

        let terminated = bytes.last() == Some(&b'\n');
        if terminated {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }

        Ok(Some(Line {
            bytes,
            offset,
            number: self.line,
            terminated,
        }))
    }

    fn next_non_blank(&mut self) -> io::Result<Option<Line>> {
        while let Some(line) = self.read_line()? {
            if !line.is_blank() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Discard lines up to (not including) the next header line
    fn resync(&mut self) -> io::Result<()> {
        let marker = self.descriptor.header_marker;
        while let Some(line) = self.read_line()? {
            if line.starts_with(marker) {
                trace!(line = line.number, "resynchronised at record header");
                self.pending = Some(line);
                break;
            }
        }
        Ok(())
    }

    fn parse_header(&self, line: &Line) -> Result<(String, Option<String>), ParseErrorKind> {
        let marker = self.descriptor.header_marker;
        let (_, (id, description)) = header_fields(marker, &line.bytes)
            .map_err(|_| ParseErrorKind::MissingHeader { marker })?;

        if id.is_empty() {
            return Err(ParseErrorKind::EmptyIdentifier);
        }
        let id = std::str::from_utf8(id).map_err(|_| ParseErrorKind::InvalidEncoding)?;
        let description = description
            .map(|d| std::str::from_utf8(trim_end(d)).map_err(|_| ParseErrorKind::InvalidEncoding))
            .transpose()?;

        Ok((id.to_string(), description.map(str::to_string)))
    }

    fn read_fasta(&mut self, header: Line) -> Result<SequenceRecord, ParseErrorKind> {
        if !header.terminated {
            return Err(ParseErrorKind::Truncated {
                expected: "end of header line",
            });
        }

        // Sequence lines are consumed even when the header is bad, so the
        // next unit starts at the following header.
        let marker = self.descriptor.header_marker;
        let mut sequence = Vec::new();
        while let Some(line) = self.read_line().map_err(io_kind)? {
            if line.starts_with(marker) {
                self.pending = Some(line);
                break;
            }
            sequence.extend(line.bytes.iter().filter(|b| !b.is_ascii_whitespace()));
        }

        let (id, description) = self.parse_header(&header)?;
        let record = SequenceRecord::new(id, sequence);
        Ok(match description {
            Some(desc) => record.with_description(desc),
            None => record,
        })
    }

    fn read_fastq(&mut self, header: Line) -> Result<SequenceRecord, ParseErrorKind> {
        let sequence_line = self
            .read_line()
            .map_err(io_kind)?
            .ok_or(ParseErrorKind::Truncated {
                expected: "sequence line",
            })?;
        if sequence_line.starts_with(self.descriptor.header_marker) {
            self.pending = Some(sequence_line);
            return Err(ParseErrorKind::Truncated {
                expected: "sequence line",
            });
        }

        let separator = self
            .read_line()
            .map_err(io_kind)?
            .ok_or(ParseErrorKind::Truncated {
                expected: "separator line",
            })?;
        let separator_marker = self.descriptor.separator_marker.unwrap_or(b'+');
        if !separator.starts_with(separator_marker) {
            if separator.starts_with(self.descriptor.header_marker) {
                self.pending = Some(separator);
            } else {
                self.resync().map_err(io_kind)?;
            }
            return Err(ParseErrorKind::MissingSeparator);
        }

        let quality_line = self
            .read_line()
            .map_err(io_kind)?
            .ok_or(ParseErrorKind::Truncated {
                expected: "quality line",
            })?;

        let sequence = trim_end(&sequence_line.bytes);
        let encoded = trim_end(&quality_line.bytes);

        // `@` is a legal quality character, so a header-like line is only
        // taken as the next record when its length cannot be this record's
        // quality string.
        if quality_line.starts_with(self.descriptor.header_marker)
            && encoded.len() != sequence.len()
        {
            self.pending = Some(quality_line);
            return Err(ParseErrorKind::Truncated {
                expected: "quality line",
            });
        }

        let (id, description) = self.parse_header(&header)?;

        if sequence.len() != encoded.len() {
            return Err(ParseErrorKind::QualityLengthMismatch {
                sequence: sequence.len(),
                quality: encoded.len(),
            });
        }
        let quality = decode_quality(encoded, self.descriptor.phred_offset)?;

        let mut record = SequenceRecord::new(id, sequence.to_vec());
        if let Some(desc) = description {
            record = record.with_description(desc);
        }
        record
            .with_quality(quality)
            .map_err(|_| ParseErrorKind::QualityLengthMismatch {
                sequence: sequence.len(),
                quality: encoded.len(),
            })
    }
}

impl<R: BufRead> Iterator for RecordParser<R> {
    type Item = Result<SequenceRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let first = match self.next_non_blank() {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(ParseError {
                    kind: io_kind(e),
                    index: self.index,
                    offset: self.offset,
                    line: self.line + 1,
                }));
            }
        };

        let index = self.index;
        self.index += 1;
        let (offset, line) = (first.offset, first.number);
        let marker = self.descriptor.header_marker;

        let result = if !first.starts_with(marker) {
            match self.resync() {
                Ok(()) => Err(ParseErrorKind::MissingHeader { marker }),
                Err(e) => Err(io_kind(e)),
            }
        } else {
            match self.descriptor.format {
                SequenceFormat::Fasta => self.read_fasta(first),
                SequenceFormat::Fastq => self.read_fastq(first),
            }
        };

        Some(result.map_err(|kind| {
            if matches!(kind, ParseErrorKind::Io(_)) {
                self.done = true;
            }
            ParseError {
                kind,
                index,
                offset,
                line,
            }
        }))
    }
}

/// Parse records from `reader` using the rules in `descriptor`
pub fn parse<R: BufRead>(reader: R, descriptor: FormatDescriptor) -> RecordParser<R> {
    RecordParser::new(reader, descriptor)
}
