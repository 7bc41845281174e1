//! PubMed retrieval and company-affiliation filtering library.
//!
//! `papers` searches PubMed through the NCBI E-utilities API, parses the returned
//! article XML and keeps only the papers that list at least one author with a
//! non-academic (company) affiliation. It provides:
//!
//! - A small async client for the `esearch` and `efetch` endpoints
//! - A keyword heuristic that classifies affiliation strings
//! - Per-article record extraction from PubMed XML
//! - CSV output of the filtered records
//!
//! # Getting Started
//!
//! ```no_run
//! use papers::{output, pipeline::Pipeline, prelude::*, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let pipeline = Pipeline::new(Config::default())?;
//!   let parsed = pipeline.run("crispr therapeutics").await?;
//!
//!   for record in &parsed.records {
//!     println!("{}: {}", record.pubmed_id, record.company_affiliations.join("; "));
//!   }
//!
//!   output::write_csv(&parsed.records, "papers.csv")?;
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: E-utilities HTTP client (search and batched fetch)
//! - [`classify`]: Affiliation classification and email extraction
//! - [`xml`]: Minimal element tree built on `quick-xml`
//! - [`parser`]: Article walking and record extraction
//! - [`record`]: Record and affiliation types
//! - [`output`]: CSV serialization
//! - [`pipeline`]: The search, fetch, parse sequence
//! - [`config`]: Endpoint and identification settings

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod xml;

pub use crate::config::Config;
use crate::{error::*, record::*, xml::Element};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use papers::prelude::*;
///
/// fn example(text: &str) -> Result<bool, PapersError> { Ok(is_company_affiliation(text)) }
/// ```
pub mod prelude {
  pub use crate::{
    classify::{extract_email, is_company_affiliation},
    error::PapersError,
    record::Record,
  };
}
