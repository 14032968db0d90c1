use super::{open_parser, print_json, ReportFormat};
use crate::cli::output::*;
use crate::cli::progress::create_spinner;
use crate::cli::Context;
use anyhow::{Context as _, Result};
use biolib_bio::{SequenceStats, StatsSummary};
use biolib_core::{BiolibError, Config, SequenceFormat};
use clap::Args;
use comfy_table::Cell;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Args)]
pub struct StatsArgs {
    /// FASTA/FASTQ files (optionally gzip-compressed, `-` for stdin)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

struct FileStats {
    path: String,
    format: SequenceFormat,
    stats: SequenceStats,
    parse_errors: usize,
}

#[derive(Serialize)]
struct FileStatsReport {
    path: String,
    format: SequenceFormat,
    #[serde(flatten)]
    summary: StatsSummary,
    parse_errors: usize,
}

impl From<&FileStats> for FileStatsReport {
    fn from(file: &FileStats) -> Self {
        Self {
            path: file.path.clone(),
            format: file.format,
            summary: file.stats.summary(),
            parse_errors: file.parse_errors,
        }
    }
}

fn collect_stats(path: &Path, config: &Config) -> Result<FileStats> {
    let parser = open_parser(path, config)?;
    let format = parser.descriptor().format;

    let mut stats = SequenceStats::new();
    let mut parse_errors = 0;
    for item in parser {
        match item {
            Ok(record) => stats.add(&record),
            Err(e) if e.is_io() => {
                return Err(BiolibError::from(e)).with_context(|| path.display().to_string());
            }
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                parse_errors += 1;
            }
        }
    }

    Ok(FileStats {
        path: path.display().to_string(),
        format,
        stats,
        parse_errors,
    })
}

fn stats_row(label: &str, format: &str, summary: &StatsSummary) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(format),
        Cell::new(format_number(summary.total_sequences)),
        Cell::new(format_number(summary.total_length)),
        Cell::new(format_number(summary.min_length)),
        Cell::new(format_number(summary.max_length)),
        Cell::new(format!("{:.1}", summary.mean_length)),
        Cell::new(format_number(summary.n50)),
        Cell::new(format_number(summary.n90)),
        Cell::new(format_percent(summary.gc_percent)),
        Cell::new(format_number(summary.ambiguous_bases)),
    ]
}

fn print_table(files: &[FileStats]) {
    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Sequences"),
        header_cell("Total length"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
        header_cell("N50"),
        header_cell("N90"),
        header_cell("GC"),
        header_cell("Ambiguous"),
    ]);

    for file in files {
        table.add_row(stats_row(&file.path, &file.format.to_string(), &file.stats.summary()));
    }

    if files.len() > 1 {
        let mut total = SequenceStats::new();
        for file in files {
            total.merge(&file.stats);
        }
        table.add_row(stats_row("Total", "", &total.summary()));
    }

    println!("{}", table);

    for file in files {
        if let Some(q) = file.stats.mean_quality() {
            println!("{}: mean quality {:.1}", file.path, q);
        }
        if file.parse_errors > 0 {
            warning(&format!(
                "{}: {} malformed record(s) skipped",
                file.path,
                format_number(file.parse_errors)
            ));
        }
    }
}

pub fn run(args: StatsArgs, ctx: &Context) -> Result<()> {
    let pb = create_spinner(
        &format!("Reading {} file(s)...", args.files.len()),
        ctx.quiet || args.format == ReportFormat::Json,
    );
    let results: Vec<Result<FileStats>> = args
        .files
        .par_iter()
        .map(|path| collect_stats(path, &ctx.config))
        .collect();
    pb.finish_and_clear();

    let files = results.into_iter().collect::<Result<Vec<_>>>()?;

    match args.format {
        ReportFormat::Json => {
            let reports: Vec<FileStatsReport> = files.iter().map(FileStatsReport::from).collect();
            print_json(&reports)?;
        }
        ReportFormat::Text => print_table(&files),
    }
    Ok(())
}
