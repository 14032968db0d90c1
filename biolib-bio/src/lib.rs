//! Sequence record engine for biolib: detection, streaming parsing,
//! validation and writing of FASTA/FASTQ records.

pub mod error;
pub mod formats;
pub mod ids;
pub mod sequence;
pub mod stats;
pub mod summary;
pub mod taxonomy;
pub mod validate;

// Re-export commonly used types
pub use error::{
    DetectError, ParseError, ParseErrorKind, RecordError, TaxonomyError, WriteError,
};
pub use sequence::{Alphabet, SequenceRecord};
// Re-export format functions
pub use formats::{
    create_output, detect, detect_path_hint, detect_reader, open_input, open_records, parse,
    parse_path, FormatDescriptor, ReadOptions, RecordParser, RecordWriter, WriteOptions,
    WriteSummary, LOOKAHEAD_WINDOW,
};
pub use ids::{duplicate_ids, extract, shared_ids, IdFilter, IdIndex, SharedIds};
pub use stats::{SequenceStats, StatsSummary};
pub use summary::RunSummary;
pub use taxonomy::{read_taxonomy, read_taxonomy_file, Rank};
pub use validate::{validate, ValidationOptions, ValidationReport, Validator, Violation};
