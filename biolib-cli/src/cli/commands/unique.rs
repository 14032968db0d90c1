use super::{open_parser, print_json, ReportFormat};
use crate::cli::output::*;
use crate::cli::progress::create_spinner;
use crate::cli::Context;
use anyhow::{Context as _, Result};
use biolib_bio::{shared_ids, IdIndex, SharedIds};
use biolib_core::{BiolibError, Config};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Ids listed per group in text output
const MAX_LISTED_IDS: usize = 10;

#[derive(Args)]
pub struct UniqueArgs {
    /// FASTA/FASTQ files to check (optionally gzip-compressed)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Serialize)]
struct FileIds {
    path: String,
    records: usize,
    duplicates: Vec<String>,
    parse_errors: usize,
}

#[derive(Serialize)]
struct UniqueReport {
    files: Vec<FileIds>,
    shared: Vec<SharedIds>,
}

impl UniqueReport {
    fn is_clean(&self) -> bool {
        self.shared.is_empty() && self.files.iter().all(|f| f.duplicates.is_empty())
    }
}

fn index_file(path: &Path, config: &Config) -> Result<(FileIds, IdIndex)> {
    let parser = open_parser(path, config)?;
    let mut index = IdIndex::new();
    let mut records = 0;
    let mut parse_errors = 0;
    for item in parser {
        match item {
            Ok(record) => {
                records += 1;
                index.insert(record.id());
            }
            Err(e) if e.is_io() => {
                return Err(BiolibError::from(e)).with_context(|| path.display().to_string());
            }
            Err(e) => {
                warn!("{}: {}", path.display(), e);
                parse_errors += 1;
            }
        }
    }

    let file = FileIds {
        path: path.display().to_string(),
        records,
        duplicates: index.duplicates().to_vec(),
        parse_errors,
    };
    Ok((file, index))
}

fn listed(ids: &[String]) -> String {
    let mut text = ids
        .iter()
        .take(MAX_LISTED_IDS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if ids.len() > MAX_LISTED_IDS {
        text.push_str(&format!(" … and {} more", ids.len() - MAX_LISTED_IDS));
    }
    text
}

fn print_text(report: &UniqueReport) {
    if report.is_clean() {
        let records: usize = report.files.iter().map(|f| f.records).sum();
        success(&format!(
            "All {} ids unique across {} file(s)",
            format_number(records),
            report.files.len()
        ));
        return;
    }

    let with_duplicates: Vec<&FileIds> = report
        .files
        .iter()
        .filter(|f| !f.duplicates.is_empty())
        .collect();
    if !with_duplicates.is_empty() {
        section_header("Duplicate ids");
        for (i, file) in with_duplicates.iter().enumerate() {
            let items = vec![
                ("Count", format_number(file.duplicates.len())),
                ("Ids", listed(&file.duplicates)),
            ];
            tree_section(&file.path, items, i == with_duplicates.len() - 1);
        }
    }

    if !report.shared.is_empty() {
        section_header("Ids shared between files");
        for (i, pair) in report.shared.iter().enumerate() {
            let items = vec![
                ("Count", format_number(pair.ids.len())),
                ("Ids", listed(&pair.ids)),
            ];
            tree_section(
                &format!("{} / {}", pair.first, pair.second),
                items,
                i == report.shared.len() - 1,
            );
        }
    }
    error("Identifiers are not unique");
}

pub fn run(args: UniqueArgs, ctx: &Context) -> Result<()> {
    let pb = create_spinner(
        &format!("Indexing ids in {} file(s)...", args.files.len()),
        ctx.quiet || args.format == ReportFormat::Json,
    );
    let results: Vec<Result<(FileIds, IdIndex)>> = args
        .files
        .par_iter()
        .map(|path| index_file(path, &ctx.config))
        .collect();
    pb.finish_and_clear();

    let mut files = Vec::with_capacity(results.len());
    let mut indexes = Vec::with_capacity(results.len());
    for result in results {
        let (file, index) = result?;
        indexes.push((file.path.clone(), index));
        files.push(file);
    }
    let report = UniqueReport {
        shared: shared_ids(&indexes),
        files,
    };

    match args.format {
        ReportFormat::Json => print_json(&report)?,
        ReportFormat::Text => print_text(&report),
    }

    if !report.is_clean() {
        return Err(BiolibError::InvalidInput("duplicate identifiers found".to_string()).into());
    }
    Ok(())
}
