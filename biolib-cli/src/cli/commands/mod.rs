pub mod convert;
pub mod extract;
pub mod stats;
pub mod unique;
pub mod validate;

use anyhow::{Context as _, Result};
use biolib_bio::formats::io::InputReader;
use biolib_bio::{open_records, ReadOptions, RecordParser};
use biolib_core::{BiolibError, Config};
use clap::ValueEnum;
use std::path::Path;

/// How a command renders its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn read_options(config: &Config) -> ReadOptions {
    ReadOptions {
        phred_offset: config.parse.phred_offset,
        lookahead: config.parse.lookahead_bytes,
    }
}

/// Open `path` and detect its format, with the path in any error message
pub fn open_parser(path: &Path, config: &Config) -> Result<RecordParser<InputReader>> {
    open_records(path, &read_options(config))
        .map_err(BiolibError::from)
        .with_context(|| format!("Cannot read {}", path.display()))
}

/// Print a serializable report as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(BiolibError::from)?;
    println!("{}", text);
    Ok(())
}
