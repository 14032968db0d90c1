//! Record serialization back to FASTA/FASTQ text

use crate::error::WriteError;
use crate::formats::detect::DEFAULT_PHRED_OFFSET;
use crate::sequence::SequenceRecord;
use biolib_core::SequenceFormat;
use serde::Serialize;
use std::borrow::Borrow;
use std::io::Write;
use tracing::warn;

/// Default FASTA sequence line width
pub const DEFAULT_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// FASTA sequence line width; 0 writes each sequence on one line
    pub line_width: usize,
    /// Abort on the first record that cannot be written instead of skipping it
    pub strict: bool,
    pub phred_offset: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            strict: false,
            phred_offset: DEFAULT_PHRED_OFFSET,
        }
    }
}

impl WriteOptions {
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Records written and skipped by a writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Streams records to a sink one at a time, in order
pub struct RecordWriter<W: Write> {
    sink: W,
    format: SequenceFormat,
    options: WriteOptions,
    summary: WriteSummary,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W, format: SequenceFormat, options: WriteOptions) -> Self {
        Self {
            sink,
            format,
            options,
            summary: WriteSummary::default(),
        }
    }

    pub fn format(&self) -> SequenceFormat {
        self.format
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Totals across every record offered to this writer
    pub fn summary(&self) -> WriteSummary {
        self.summary
    }

    /// Write one record.
    ///
    /// Fails with `UnsupportedConversion` when the target format needs quality
    /// scores the record does not have; nothing is written in that case.
    pub fn write_record(&mut self, record: &SequenceRecord) -> Result<(), WriteError> {
        match self.format {
            SequenceFormat::Fasta => self.write_fasta(record)?,
            SequenceFormat::Fastq => self.write_fastq(record)?,
        }
        self.summary.written += 1;
        Ok(())
    }

    /// Write one record, skipping it when it cannot be converted and the
    /// writer is not strict. Returns whether the record was written.
    pub fn write_or_skip(&mut self, record: &SequenceRecord) -> Result<bool, WriteError> {
        match self.write_record(record) {
            Ok(()) => Ok(true),
            Err(err @ WriteError::UnsupportedConversion { .. }) if !self.options.strict => {
                warn!("skipping record: {}", err);
                self.summary.skipped += 1;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Write every record, skipping unconvertible ones unless strict
    pub fn write_all<I>(&mut self, records: I) -> Result<WriteSummary, WriteError>
    where
        I: IntoIterator,
        I::Item: Borrow<SequenceRecord>,
    {
        let mut summary = WriteSummary::default();
        for record in records {
            if self.write_or_skip(record.borrow())? {
                summary.written += 1;
            } else {
                summary.skipped += 1;
            }
        }
        Ok(summary)
    }

    /// Flush buffered output and hand back the sink
    pub fn finish(mut self) -> Result<W, WriteError> {
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn write_fasta(&mut self, record: &SequenceRecord) -> Result<(), WriteError> {
        writeln!(self.sink, ">{}", record.header())?;

        let sequence = record.sequence();
        if sequence.is_empty() {
            return Ok(());
        }
        let width = match self.options.line_width {
            0 => sequence.len(),
            w => w,
        };
        for line in sequence.chunks(width) {
            self.sink.write_all(line)?;
            self.sink.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_fastq(&mut self, record: &SequenceRecord) -> Result<(), WriteError> {
        let quality = record
            .quality()
            .ok_or_else(|| WriteError::UnsupportedConversion {
                id: record.id().to_string(),
                format: SequenceFormat::Fastq,
            })?;

        let offset = self.options.phred_offset;
        let encoded: Vec<u8> = quality
            .iter()
            .map(|&q| q.saturating_add(offset).min(b'~'))
            .collect();

        writeln!(self.sink, "@{}", record.header())?;
        self.sink.write_all(record.sequence())?;
        self.sink.write_all(b"\n+\n")?;
        self.sink.write_all(&encoded)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }
}
