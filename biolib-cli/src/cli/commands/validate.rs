use super::{open_parser, print_json, ReportFormat};
use crate::cli::output::*;
use crate::cli::progress::create_spinner;
use crate::cli::Context;
use anyhow::Result;
use biolib_bio::sequence::infer_alphabet;
use biolib_bio::{
    Alphabet, ParseError, RunSummary, SequenceRecord, ValidationOptions, ValidationReport,
    Validator,
};
use biolib_core::{AlphabetKind, BiolibError, Config};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Records inspected when guessing a file's alphabet
const INFER_SAMPLE: usize = 10;
/// Fraction of symbols that must fit an alphabet for it to be inferred
const INFER_FRACTION: f64 = 0.95;
/// Failing records listed per file in text output
const MAX_LISTED_FAILURES: usize = 10;
/// Failure and parse-error details kept per file; the summary counts them all
const MAX_STORED_REPORTS: usize = 100;

#[derive(Args)]
pub struct ValidateArgs {
    /// FASTA/FASTQ files to validate (optionally gzip-compressed, `-` for stdin)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Alphabet to validate against (default from config, `auto` infers per file)
    #[arg(short, long, value_enum)]
    pub alphabet: Option<AlphabetKind>,

    /// Reject IUPAC ambiguity codes
    #[arg(long)]
    pub no_ambiguity: bool,

    /// Accept gap symbols ('-' and '.')
    #[arg(long)]
    pub allow_gaps: bool,

    /// Accept zero-length sequences
    #[arg(long)]
    pub allow_empty: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// Validation outcome for one input file
#[derive(Debug, Serialize)]
pub struct FileValidation {
    pub path: String,
    pub alphabet: Option<Alphabet>,
    pub summary: RunSummary,
    /// First records with at least one violation
    pub failures: Vec<ValidationReport>,
    /// More records failed than `failures` holds
    pub failures_truncated: bool,
    pub parse_errors: Vec<String>,
    pub parse_errors_truncated: bool,
}

impl FileValidation {
    fn new(path: &Path, kind: AlphabetKind) -> Self {
        Self {
            path: path.display().to_string(),
            alphabet: Alphabet::from_kind(kind),
            summary: RunSummary::new(),
            failures: Vec::new(),
            failures_truncated: false,
            parse_errors: Vec::new(),
            parse_errors_truncated: false,
        }
    }

    fn note_failure(&mut self, failure: ValidationReport) {
        self.summary.failed_validation += 1;
        if self.failures.len() < MAX_STORED_REPORTS {
            self.failures.push(failure);
        } else {
            self.failures_truncated = true;
        }
    }
}

fn validation_options(args: &ValidateArgs, config: &Config) -> ValidationOptions {
    ValidationOptions {
        allow_ambiguity: config.validation.allow_ambiguity && !args.no_ambiguity,
        allow_gaps: config.validation.allow_gaps || args.allow_gaps,
        require_non_empty: config.validation.require_non_empty && !args.allow_empty,
    }
}

/// Count a malformed record; a read failure aborts the file
fn note_parse_error(report: &mut FileValidation, err: ParseError) -> Result<()> {
    if err.is_io() {
        return Err(anyhow::Error::from(BiolibError::from(err)).context(report.path.clone()));
    }
    warn!("{}: {}", report.path, err);
    report.summary.parse_errors += 1;
    if report.parse_errors.len() < MAX_STORED_REPORTS {
        report.parse_errors.push(err.to_string());
    } else {
        report.parse_errors_truncated = true;
    }
    Ok(())
}

fn validate_file(
    path: &Path,
    kind: AlphabetKind,
    options: ValidationOptions,
    config: &Config,
) -> Result<FileValidation> {
    let mut parser = open_parser(path, config)?;
    let mut report = FileValidation::new(path, kind);

    // Records read while sampling for alphabet inference are validated once
    // the alphabet is known.
    let mut sampled: Vec<SequenceRecord> = Vec::new();
    let alphabet = match report.alphabet {
        Some(alphabet) => alphabet,
        None => {
            for item in parser.by_ref() {
                match item {
                    Ok(record) => {
                        sampled.push(record);
                        if sampled.iter().filter(|r| !r.is_empty()).count() >= INFER_SAMPLE {
                            break;
                        }
                    }
                    Err(e) => note_parse_error(&mut report, e)?,
                }
            }
            let inferred = infer_alphabet(&sampled, INFER_FRACTION, INFER_SAMPLE).unwrap_or_else(|| {
                if !sampled.is_empty() {
                    warn!("{}: could not infer alphabet, checking against protein", report.path);
                }
                Alphabet::Protein
            });
            info!("{}: validating as {}", report.path, inferred);
            report.alphabet = Some(inferred);
            inferred
        }
    };

    let validator = Validator::new(alphabet, options);
    let check = |record: SequenceRecord, report: &mut FileValidation| {
        report.summary.processed += 1;
        let result = validator.validate(&record);
        if result.is_valid() {
            report.summary.passed += 1;
        } else {
            report.note_failure(result);
        }
    };

    for record in sampled {
        check(record, &mut report);
    }
    for item in parser {
        match item {
            Ok(record) => check(record, &mut report),
            Err(e) => note_parse_error(&mut report, e)?,
        }
    }

    Ok(report)
}

fn print_text(report: &FileValidation) {
    section_header(&report.path);
    let alphabet = report
        .alphabet
        .map_or_else(|| "-".to_string(), |a| a.to_string());
    tree_section(
        "Records",
        vec![
            ("Alphabet", alphabet),
            ("Processed", format_number(report.summary.processed)),
            ("Passed", format_number(report.summary.passed)),
            ("Failed validation", format_number(report.summary.failed_validation)),
            ("Parse errors", format_number(report.summary.parse_errors)),
        ],
        report.failures.is_empty() && report.parse_errors.is_empty(),
    );

    if !report.failures.is_empty() {
        let last_section = report.parse_errors.is_empty();
        let items: Vec<(&str, String)> = report
            .failures
            .iter()
            .take(MAX_LISTED_FAILURES)
            .map(|failure| {
                let details = failure
                    .violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                (failure.id.as_str(), details)
            })
            .collect();
        tree_section("Invalid records", items, last_section);
        let failed = report.summary.failed_validation;
        if failed > MAX_LISTED_FAILURES {
            println!("   … and {} more", format_number(failed - MAX_LISTED_FAILURES));
        }
    }

    if !report.parse_errors.is_empty() {
        let items: Vec<(&str, String)> = report
            .parse_errors
            .iter()
            .take(MAX_LISTED_FAILURES)
            .map(|e| ("Malformed", e.clone()))
            .collect();
        tree_section("Parse errors", items, true);
        let malformed = report.summary.parse_errors;
        if malformed > MAX_LISTED_FAILURES {
            println!("   … and {} more", format_number(malformed - MAX_LISTED_FAILURES));
        }
    }
}

pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let kind = args.alphabet.unwrap_or(ctx.config.validation.alphabet);
    let options = validation_options(&args, &ctx.config);

    let pb = create_spinner(
        &format!("Validating {} file(s)...", args.files.len()),
        ctx.quiet || args.format == ReportFormat::Json,
    );
    let results: Vec<Result<FileValidation>> = args
        .files
        .par_iter()
        .map(|path| validate_file(path, kind, options, &ctx.config))
        .collect();
    pb.finish_and_clear();

    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        reports.push(result?);
    }

    let mut total = RunSummary::new();
    for report in &reports {
        total += report.summary;
    }

    match args.format {
        ReportFormat::Json => print_json(&reports)?,
        ReportFormat::Text => {
            for report in &reports {
                print_text(report);
            }
            subsection_header("Summary");
            if total.is_clean() {
                success(&format!(
                    "All {} records valid",
                    format_number(total.processed)
                ));
            } else {
                warning(&total.to_string());
            }
        }
    }

    if total.parse_errors > 0 {
        return Err(BiolibError::Parse(format!(
            "{} malformed record(s) skipped",
            total.parse_errors
        ))
        .into());
    }
    if total.failed_validation > 0 {
        return Err(BiolibError::InvalidInput(format!(
            "{} record(s) failed validation",
            total.failed_validation
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biolib_bio::Violation;

    fn failure(id: &str) -> ValidationReport {
        ValidationReport {
            id: id.to_string(),
            violations: vec![Violation::EmptySequence],
        }
    }

    #[test]
    fn test_stored_failures_are_capped() {
        let mut report = FileValidation::new(Path::new("reads.fa"), AlphabetKind::Dna);
        for i in 0..MAX_STORED_REPORTS + 5 {
            report.note_failure(failure(&format!("r{}", i)));
        }
        assert_eq!(report.failures.len(), MAX_STORED_REPORTS);
        assert!(report.failures_truncated);
        assert_eq!(report.summary.failed_validation, MAX_STORED_REPORTS + 5);
        assert_eq!(report.failures[0].id, "r0");
    }

    #[test]
    fn test_few_failures_not_truncated() {
        let mut report = FileValidation::new(Path::new("reads.fa"), AlphabetKind::Dna);
        report.note_failure(failure("r0"));
        assert!(!report.failures_truncated);
        assert!(!report.parse_errors_truncated);
    }
}
