use super::open_parser;
use crate::cli::output::stderr_summary;
use crate::cli::Context;
use anyhow::{Context as _, Result};
use biolib_bio::{create_output, IdFilter, RecordWriter, RunSummary, WriteOptions};
use biolib_core::BiolibError;
use clap::{ArgGroup, Args};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Args)]
#[command(group(ArgGroup::new("selector").required(true).args(["ids", "id", "pattern"])))]
pub struct ExtractArgs {
    /// Input FASTA/FASTQ file (optionally gzip-compressed, `-` for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// File listing ids to keep, one per line
    #[arg(long, value_name = "FILE")]
    pub ids: Option<PathBuf>,

    /// Id to keep (repeatable)
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub id: Vec<String>,

    /// Keep records whose header matches this regex
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Output file (`.gz` is compressed, `-` for stdout)
    #[arg(short, long, value_name = "OUTPUT", default_value = "-")]
    pub output: PathBuf,
}

fn build_filter(args: &ExtractArgs) -> Result<IdFilter> {
    if let Some(pattern) = &args.pattern {
        return IdFilter::pattern(pattern)
            .map_err(|e| BiolibError::InvalidInput(format!("invalid pattern: {}", e)).into());
    }
    if let Some(path) = &args.ids {
        let text = std::fs::read_to_string(path)
            .map_err(BiolibError::from)
            .with_context(|| format!("Cannot read id list {}", path.display()))?;
        return Ok(IdFilter::from_id_list(&text));
    }
    Ok(IdFilter::from_ids(args.id.iter().cloned()))
}

pub fn run(args: ExtractArgs, ctx: &Context) -> Result<()> {
    let filter = build_filter(&args)?;
    if let IdFilter::Ids(ids) = &filter {
        debug!("extracting {} id(s)", ids.len());
    }

    let parser = open_parser(&args.input, &ctx.config)?;
    let format = parser.descriptor().format;

    let options = WriteOptions {
        line_width: ctx.config.output.line_width,
        strict: true,
        phred_offset: ctx.config.parse.phred_offset,
    };
    let sink = create_output(&args.output)
        .map_err(BiolibError::from)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;
    let mut writer = RecordWriter::new(sink, format, options);

    let mut summary = RunSummary::new();
    for item in parser {
        match item {
            Ok(record) => {
                summary.processed += 1;
                if filter.matches(&record) {
                    writer.write_record(&record).map_err(BiolibError::from)?;
                    summary.passed += 1;
                }
            }
            Err(e) if e.is_io() => {
                return Err(BiolibError::from(e))
                    .with_context(|| format!("Cannot read {}", args.input.display()));
            }
            Err(e) => {
                warn!("{}: {}", args.input.display(), e);
                summary.parse_errors += 1;
            }
        }
    }
    writer.finish().map_err(BiolibError::from)?;

    if !ctx.quiet {
        stderr_summary(
            "Extracted",
            &format!(
                "{} of {} records, {} malformed",
                summary.passed, summary.processed, summary.parse_errors
            ),
        );
    }
    Ok(())
}
