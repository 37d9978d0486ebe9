//! concord - build a word concordance from a text file
//!
//! concord provides:
//! - Line-by-line ingestion with printable-ASCII sanitizing
//! - Case-folded word tokens split on a fixed separator set
//! - Sorted output as text, jsonl, json or markdown

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;

use crate::core::error::{exit_status_for, EXIT_SUCCESS, EXIT_USAGE};

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here
            let status = if err.use_stderr() {
                EXIT_USAGE
            } else {
                EXIT_SUCCESS
            };
            let _ = err.print();
            return ExitCode::from(status);
        }
    };

    cli::init_logging(cli.verbose, cli.quiet);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_status_for(&err))
        }
    }
}
