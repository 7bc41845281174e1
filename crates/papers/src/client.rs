//! Async client for the NCBI E-utilities `esearch` and `efetch` endpoints.
//!
//! Both calls are single GET requests with no retry. A transport failure or a
//! non-success status aborts the call with a [`PapersError`].
//!
//! ```no_run
//! use papers::{client::PubMed, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PubMed::new(&Config::default())?;
//! let ids = client.search("monoclonal antibody").await?;
//! let xml = client.fetch(&ids).await?;
//! println!("{} bytes of XML for {} papers", xml.len(), ids.len());
//! # Ok(())
//! # }
//! ```

use reqwest::Url;

use super::*;

/// Search endpoint, relative to [`Config::base_url`].
pub const SEARCH_ENDPOINT: &str = "esearch.fcgi";
/// Fetch endpoint, relative to [`Config::base_url`].
pub const FETCH_ENDPOINT: &str = "efetch.fcgi";

/// Handle on the E-utilities API.
#[derive(Debug, Clone)]
pub struct PubMed {
  /// Underlying HTTP client
  http:   reqwest::Client,
  /// Endpoint and identification settings
  config: Config,
}

/// Body of an `esearch` JSON response. Missing keys deserialize as empty.
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
  /// Result block
  #[serde(default)]
  esearchresult: SearchResult,
}

/// The `esearchresult` block of a search response.
#[derive(Debug, Default, Deserialize)]
struct SearchResult {
  /// Total number of matches, reported as a string
  #[serde(default)]
  count:  Option<String>,
  /// Matching identifiers, at most `retmax` of them
  #[serde(default)]
  idlist: Vec<String>,
}

impl PubMed {
  /// Creates a client for the endpoints under `config.base_url`.
  ///
  /// Fails with [`PapersError::Config`] when the base URL does not parse.
  pub fn new(config: &Config) -> Result<Self> {
    Url::parse(&config.base_url)
      .map_err(|e| PapersError::Config(format!("Invalid base URL {}: {e}", config.base_url)))?;
    Ok(Self { http: reqwest::Client::new(), config: config.clone() })
  }

  /// The settings this client was built with.
  pub fn config(&self) -> &Config { &self.config }

  /// Resolves a free-text query into PubMed identifiers, in the order PubMed ranks them.
  pub async fn search(&self, query: &str) -> Result<Vec<String>> {
    let max_results = self.config.max_results.to_string();
    let mut params = vec![
      ("db", self.config.database.as_str()),
      ("term", query),
      ("retmode", "json"),
      ("retmax", max_results.as_str()),
    ];
    params.extend(self.config.identification());

    let body = self.get(SEARCH_ENDPOINT, &params).await?;
    let response: SearchResponse = serde_json::from_str(&body)?;
    let SearchResult { count, idlist } = response.esearchresult;

    if let Some(count) = count {
      debug!("Search for {query:?} matched {count} papers, keeping {}", idlist.len());
    }
    Ok(idlist)
  }

  /// Retrieves the XML records for all `ids` in one batched request.
  ///
  /// An empty identifier list issues no request and returns an empty document.
  pub async fn fetch(&self, ids: &[String]) -> Result<String> {
    if ids.is_empty() {
      debug!("No identifiers to fetch");
      return Ok(String::new());
    }

    let ids = ids.join(",");
    let mut params =
      vec![("db", self.config.database.as_str()), ("id", ids.as_str()), ("retmode", "xml")];
    params.extend(self.config.identification());

    self.get(FETCH_ENDPOINT, &params).await
  }

  /// Sends a GET request to `endpoint` and returns the body of a successful response.
  async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
    let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
    debug!("Requesting {url}");

    let response = self.http.get(&url).query(params).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(PapersError::Status { endpoint: endpoint.to_string(), status: status.as_u16() });
    }

    let body = response.text().await?;
    trace!("{endpoint} response: {body}");
    Ok(body)
  }
}
