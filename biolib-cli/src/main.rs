use clap::Parser;
use colored::*;
use std::process;
use tracing::debug;

mod cli;

use crate::cli::{Cli, Commands, Context};
use biolib_core::BiolibError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = biolib_core::logging::init(cli.verbose, cli.quiet) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<BiolibError>())
            .map_or(1, BiolibError::exit_code);
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = biolib_core::load_or_default(cli.config.as_deref())?;

    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| BiolibError::Other(format!("Failed to initialize thread pool: {}", e)))?;
    debug!("using {} threads", num_threads);

    let ctx = Context {
        config,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Validate(args) => crate::cli::commands::validate::run(args, &ctx),
        Commands::Convert(args) => crate::cli::commands::convert::run(args, &ctx),
        Commands::Stats(args) => crate::cli::commands::stats::run(args, &ctx),
        Commands::Extract(args) => crate::cli::commands::extract::run(args, &ctx),
        Commands::Unique(args) => crate::cli::commands::unique::run(args, &ctx),
    }
}
