pub mod commands;
pub mod output;
pub mod progress;

use biolib_core::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "biolib",
    version,
    about = "Common tasks for FASTA/FASTQ sequence files",
    long_about = "biolib streams FASTA and FASTQ files (optionally gzip-compressed), \
                  validates records against nucleotide or protein alphabets, converts \
                  between formats and reports sequence statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,

    /// Configuration file (defaults to $BIOLIB_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check records against a sequence alphabet
    Validate(commands::validate::ValidateArgs),

    /// Convert between FASTA and FASTQ
    Convert(commands::convert::ConvertArgs),

    /// Show length and composition statistics
    Stats(commands::stats::StatsArgs),

    /// Extract records by id or header pattern
    Extract(commands::extract::ExtractArgs),

    /// Report duplicate ids within files and ids shared between files
    Unique(commands::unique::UniqueArgs),
}

/// Settings every command runs with
pub struct Context {
    pub config: Config,
    pub quiet: bool,
}
