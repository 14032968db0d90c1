pub mod detect;
pub mod io;
pub mod parser;
pub mod writer;

pub use detect::{detect, detect_path_hint, detect_reader, FormatDescriptor, LOOKAHEAD_WINDOW};
pub use io::{create_output, open_input, open_records, parse_path, ReadOptions};
pub use parser::{parse, RecordParser};
pub use writer::{RecordWriter, WriteOptions, WriteSummary};
