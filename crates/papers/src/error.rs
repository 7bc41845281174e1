//! Error types for the papers library.
//!
//! Every failure that aborts a run surfaces as a [`PapersError`]. The parser also
//! sees it for problems inside a single article, such as a bad escape in its text;
//! those articles are skipped and counted instead of failing the run.
//!
//! # Examples
//!
//! ```no_run
//! use papers::{client::PubMed, error::PapersError, Config};
//!
//! # async fn example() -> Result<(), PapersError> {
//! let client = PubMed::new(&Config::default())?;
//! match client.search("aspirin").await {
//!   Err(PapersError::Status { status, .. }) => println!("PubMed answered {status}"),
//!   Err(PapersError::Network(e)) => println!("Network error: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(ids) => println!("Found {} papers", ids.len()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`papers`](crate) crate.
pub type Result<T> = core::result::Result<T, PapersError>;

/// Errors that can occur while retrieving, parsing or writing papers.
#[derive(Error, Debug)]
pub enum PapersError {
  /// A network request failed before a response was received.
  ///
  /// This covers DNS failures, refused connections, TLS errors and bodies that
  /// could not be read or decoded.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The E-utilities endpoint answered with a non-success status code.
  #[error("{endpoint} returned HTTP {status}")]
  Status {
    /// Endpoint name, e.g. `esearch.fcgi`
    endpoint: String,
    /// Status code returned by the server
    status:   u16,
  },

  /// The fetched document is not well-formed XML.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// Character data holds an unknown or unterminated entity reference.
  #[error("invalid escape in text: {0}")]
  Escape(#[from] quick_xml::escape::EscapeError),

  /// The search response could not be decoded as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// Writing CSV output failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration is unusable, e.g. an invalid base URL.
  #[error("{0}")]
  Config(String),
}
