//! Command line interface for listing PubMed papers with company-affiliated authors.
//!
//! The tool searches PubMed, fetches the matching articles and keeps those with at
//! least one author whose affiliation reads as a company rather than an academic
//! institution.
//!
//! # Usage
//!
//! ```bash
//! # Print matching papers as CSV
//! get-papers-list "crispr gene therapy"
//!
//! # Save them to a file instead
//! get-papers-list "crispr gene therapy" --file papers.csv
//!
//! # Show debug logs while running
//! get-papers-list "crispr gene therapy" -d
//! ```
//!
//! Settings are read from the platform configuration file (see
//! [`Config::default_path`]) or from `--config`, and any flag given on the command
//! line takes precedence.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{io::Write, path::PathBuf, process::ExitCode};

use clap::{builder::ArgAction, Parser};
use console::style;
use papers::{
  error::PapersError,
  output::{self, WriteOutcome},
  pipeline::Pipeline,
  Config,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod error;

use crate::error::*;

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(
  name = "get-papers-list",
  author,
  version,
  about = "Fetch PubMed papers that have at least one company-affiliated author"
)]
pub struct Cli {
  /// PubMed search query, using full PubMed query syntax
  query: String,

  /// Write the results to this CSV file instead of printing them
  #[arg(short, long)]
  file: Option<PathBuf>,

  /// Print debug information while running
  #[arg(short, long)]
  debug: bool,

  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(short, long, action = ArgAction::Count, help = "Increase logging verbosity")]
  verbose: u8,

  /// Configuration file to read instead of the default location
  #[arg(long)]
  config: Option<PathBuf>,

  /// E-utilities root URL
  #[arg(long)]
  base_url: Option<String>,

  /// Maximum number of search results to fetch
  #[arg(long)]
  max_results: Option<usize>,

  /// Contact email reported to NCBI
  #[arg(long)]
  email: Option<String>,

  /// NCBI API key
  #[arg(long)]
  api_key: Option<String>,
}

impl Cli {
  /// Loads the configuration file and applies command line overrides on top of it.
  fn config(&self) -> Result<Config> {
    let path = self.config.clone().unwrap_or_else(Config::default_path);
    let mut config =
      if self.config.is_some() { Config::load(&path)? } else { Config::load_or_default(&path)? };

    if let Some(base_url) = &self.base_url {
      config = config.with_base_url(base_url);
    }
    if let Some(max_results) = self.max_results {
      config = config.with_max_results(max_results);
    }
    if let Some(email) = &self.email {
      config = config.with_email(email);
    }
    if let Some(api_key) = &self.api_key {
      config = config.with_api_key(api_key);
    }
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `--debug` raises the level to at least debug. `RUST_LOG` overrides both.
fn setup_logging(verbosity: u8, debug: bool) {
  let verbosity = if debug { verbosity.max(3) } else { verbosity };
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Runs the search and writes the results where the user asked for them.
async fn run(cli: &Cli) -> Result<()> {
  let pipeline = Pipeline::new(cli.config()?)?;
  trace!("Using configuration {:?}", pipeline.client().config());

  let parsed = pipeline.run(&cli.query).await?;
  debug!(
    "{} of {} articles kept ({} skipped)",
    parsed.records.len(),
    parsed.articles,
    parsed.skipped
  );

  match &cli.file {
    Some(path) => match output::write_csv(&parsed.records, path)? {
      outcome @ WriteOutcome::Written(_) => println!("{}{outcome}", style(SUCCESS_PREFIX).green()),
      outcome @ WriteOutcome::Empty => println!("{}{outcome}", style(INFO_PREFIX).cyan()),
    },
    None if parsed.records.is_empty() =>
      println!("{}{}", style(INFO_PREFIX).cyan(), WriteOutcome::Empty),
    None => {
      let mut stdout = std::io::stdout().lock();
      output::write_records(&parsed.records, &mut stdout)?;
      stdout.flush()?;
    },
  }
  Ok(())
}

/// Entry point for the `get-papers-list` CLI application
///
/// Search or fetch failures, unreadable configuration and output errors end the run
/// with an error line on stderr and a failing exit status.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose, cli.debug);

  match run(&cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{} {e}", style(ERROR_PREFIX).red());
      ExitCode::FAILURE
    },
  }
}
