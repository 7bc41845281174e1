//! Error type for the `get-papers-list` binary.

use thiserror::Error;

use super::*;

/// Result alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, CliError>;

/// Failures that end a CLI run with a non-zero exit status.
#[derive(Error, Debug)]
pub enum CliError {
  /// Any failure from the `papers` library.
  #[error(transparent)]
  Papers(#[from] PapersError),

  /// Writing to standard output failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
