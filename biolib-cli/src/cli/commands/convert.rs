use super::open_parser;
use crate::cli::output::stderr_summary;
use crate::cli::progress::create_spinner;
use crate::cli::Context;
use anyhow::{Context as _, Result};
use biolib_bio::{create_output, RecordWriter, RunSummary, WriteOptions};
use biolib_core::{BiolibError, SequenceFormat};
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Args)]
pub struct ConvertArgs {
    /// Input FASTA/FASTQ file (optionally gzip-compressed, `-` for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (`.gz` is compressed, `-` for stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Target format
    #[arg(long, value_enum)]
    pub to: SequenceFormat,

    /// Fail on the first record that cannot be converted or parsed
    #[arg(long)]
    pub strict: bool,

    /// FASTA line width (0 = no wrapping; default from config)
    #[arg(long, value_name = "N")]
    pub line_width: Option<usize>,
}

pub fn run(args: ConvertArgs, ctx: &Context) -> Result<()> {
    let mut parser = open_parser(&args.input, &ctx.config)?;
    let source = parser.descriptor().format;

    let options = WriteOptions {
        line_width: args.line_width.unwrap_or(ctx.config.output.line_width),
        strict: args.strict || ctx.config.output.strict,
        phred_offset: ctx.config.parse.phred_offset,
    };
    let sink = create_output(&args.output)
        .map_err(BiolibError::from)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;
    let mut writer = RecordWriter::new(sink, args.to, options);

    info!("converting {} from {} to {}", args.input.display(), source, args.to);
    let pb = create_spinner(&format!("Converting {} to {}...", source, args.to), ctx.quiet);

    let mut summary = RunSummary::new();
    for item in parser.by_ref() {
        match item {
            Ok(record) => {
                summary.processed += 1;
                if !writer.write_or_skip(&record).map_err(BiolibError::from)? {
                    summary.write_skipped += 1;
                }
                if summary.processed % 10_000 == 0 {
                    pb.set_message(format!("Converted {} records...", summary.processed));
                }
            }
            Err(e) if e.is_io() || options.strict => {
                return Err(BiolibError::from(e))
                    .with_context(|| format!("Cannot convert {}", args.input.display()));
            }
            Err(e) => {
                warn!("{}: {}", args.input.display(), e);
                summary.parse_errors += 1;
            }
        }
    }
    writer.finish().map_err(BiolibError::from)?;
    pb.finish_and_clear();
    debug!(
        "read {} units from {} bytes of {}",
        parser.units_seen(),
        parser.bytes_read(),
        args.input.display()
    );

    summary.passed = summary.processed - summary.write_skipped;
    if !ctx.quiet {
        stderr_summary(
            "Converted",
            &format!(
                "{} records written, {} not convertible, {} malformed",
                summary.passed, summary.write_skipped, summary.parse_errors
            ),
        );
    }
    Ok(())
}
