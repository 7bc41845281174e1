//! The search, fetch and parse sequence.
//!
//! Each stage runs to completion before the next one starts. Errors from search or
//! fetch abort the run; per-article problems are absorbed by the parser.

use super::*;
use crate::{client::PubMed, parser::ParsedPapers};

/// Runs queries end to end against one [`PubMed`] client.
#[derive(Debug, Clone)]
pub struct Pipeline {
  /// Client used for both requests
  client: PubMed,
}

impl Pipeline {
  /// Creates a pipeline from configuration.
  pub fn new(config: Config) -> Result<Self> { Ok(Self { client: PubMed::new(&config)? }) }

  /// Creates a pipeline around an existing client.
  pub fn with_client(client: PubMed) -> Self { Self { client } }

  /// The client this pipeline sends requests through.
  pub fn client(&self) -> &PubMed { &self.client }

  /// Searches for `query`, fetches every hit in one batch and keeps the papers with a
  /// company affiliation.
  pub async fn run(&self, query: &str) -> Result<ParsedPapers> {
    let ids = self.client.search(query).await?;
    debug!("Search for {query:?} returned {} identifiers", ids.len());
    if ids.is_empty() {
      return Ok(ParsedPapers::default());
    }

    let xml = self.client.fetch(&ids).await?;
    parser::parse_papers(&xml)
  }
}
