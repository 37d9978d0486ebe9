//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;
use tracing::Level;

use crate::core::error::ConcordError;
use crate::core::ingest::{ingest, IngestSummary};
use crate::core::model::ConcordanceStore;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};

/// Distinct words reserved up front; the table grows past this as needed
const INITIAL_CAPACITY: usize = 1024;

/// concord - list every word of a text file with the lines it appears on.
#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(
    author,
    version,
    about,
    long_about = r#"concord reads one text file and prints a concordance: every distinct word,
lowercased, followed by the line numbers it occurs on. Words are printed in
ascending byte order; line numbers keep their order of appearance, and a word
used twice on one line is listed twice.

A word is a run of characters that are not separators. Separators are space,
the line terminator, any non-printable byte and:
    . ; : , + " ' ! ? @ # $ % ^ & * ( ) = { } [ ] | ~ < > \ / - _

Exit status:
    0  success
    2  usage error
    3  the concordance store could not be allocated
    4  the file could not be opened, read or processed

Examples:
    concord notes.txt
    concord book.txt --format jsonl
    concord book.txt --stats -v
"#
)]
pub struct Cli {
    /// Text file to index.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format (text/jsonl/json/md).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        value_parser = ["text", "jsonl", "json", "md", "markdown"],
        long_help = "Select the output format for the concordance.\n\n\
Supported values:\n\
- text (default): `<word> <line> <line> ...` per line\n\
- jsonl: one {\"word\", \"lines\"} object per line\n\
- json: a single JSON array\n\
- md (markdown): a table"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on text/md formats."
    )]
    pub pretty: bool,

    /// Show ingestion statistics on stderr.
    #[arg(
        long,
        long_help = "Print line, token, distinct-word and occurrence counts, plus the most\n\
frequent word, to stderr after the report."
    )]
    pub stats: bool,

    /// Verbose mode (-v debug, -vv trace).
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        conflicts_with = "quiet",
        long_help = "Enable more detailed diagnostics on stderr. Repeat for trace output\n\
(per-line sanitizing details)."
    )]
    pub verbose: u8,

    /// Quiet mode (errors only).
    #[arg(
        short,
        long,
        long_help = "Only log errors. The concordance itself is still printed to stdout."
    )]
    pub quiet: bool,
}

/// Install the stderr log subscriber
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // value_parser already rejected anything unknown
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let mut store = ConcordanceStore::with_capacity(INITIAL_CAPACITY)?;

    let summary = ingest(&cli.file, &mut store)
        .map_err(ConcordError::from)
        .with_context(|| format!("failed to process {}", cli.file.display()))?;

    if store.is_empty() {
        tracing::debug!("no words found, report is empty");
    }
    if summary.sanitized_bytes > 0 {
        tracing::info!(
            bytes = summary.sanitized_bytes,
            "non-printable bytes were treated as separators"
        );
    }

    let stdout = io::stdout();
    Renderer::with_config(render_config)
        .render_to(&store, stdout.lock())
        .map_err(ConcordError::Output)?;

    if cli.stats {
        print_stats(&summary, &store);
    }

    Ok(())
}

fn print_stats(summary: &IngestSummary, store: &ConcordanceStore) {
    eprintln!("Concordance Statistics:");
    eprintln!("   Lines: {}", summary.lines);
    eprintln!("   Tokens: {}", summary.tokens);
    eprintln!("   Distinct words: {}", store.len());
    eprintln!("   Occurrences: {}", store.total_occurrences());
    if let Some(top) = store.most_frequent() {
        eprintln!("   Most frequent: {} ({})", top.word, top.occurrences());
    }
    if summary.sanitized_bytes > 0 {
        eprintln!("   Non-printable bytes: {}", summary.sanitized_bytes);
    }
}
