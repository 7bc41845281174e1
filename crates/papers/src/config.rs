//! Endpoint and identification settings for the E-utilities client.
//!
//! A [`Config`] can be built in code, loaded from a TOML file, or both:
//!
//! ```toml
//! base_url    = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils"
//! database    = "pubmed"
//! max_results = 100
//! tool        = "papers"
//! email       = "someone@example.com"
//! ```

use super::*;

/// Default E-utilities root.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Settings used by [`PubMed`](crate::client::PubMed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Root URL the `esearch.fcgi` and `efetch.fcgi` endpoints live under
  pub base_url:    String,
  /// Entrez database to query
  pub database:    String,
  /// Upper bound on identifiers returned by a search (`retmax`)
  pub max_results: usize,
  /// Tool name reported to NCBI
  pub tool:        Option<String>,
  /// Contact address reported to NCBI
  pub email:       Option<String>,
  /// NCBI API key, raises the request rate limit
  pub api_key:     Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url:    DEFAULT_BASE_URL.to_string(),
      database:    "pubmed".to_string(),
      max_results: 100,
      tool:        None,
      email:       None,
      api_key:     None,
    }
  }
}

impl Config {
  /// Platform-specific location of the configuration file,
  /// e.g. `~/.config/papers/config.toml` on Linux.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("papers").join("config.toml")
  }

  /// Parses a configuration from TOML text. Missing keys take their default values.
  pub fn from_toml(toml_str: &str) -> Result<Self> { Ok(toml::from_str(toml_str)?) }

  /// Reads a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Self::from_toml(&content)
  }

  /// Reads a configuration file, falling back to [`Config::default`] when it does not exist.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      debug!("Loading configuration from {}", path.display());
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Sets the E-utilities root URL.
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Sets the search result cap.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Sets the contact email reported to NCBI.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  /// Sets the NCBI API key.
  pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
    self.api_key = Some(api_key.into());
    self
  }

  /// Query parameters identifying the caller to NCBI, only those that are set.
  pub(crate) fn identification(&self) -> Vec<(&'static str, &str)> {
    [("tool", &self.tool), ("email", &self.email), ("api_key", &self.api_key)]
      .into_iter()
      .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.database, "pubmed");
    assert_eq!(config.max_results, 100);
    assert!(config.identification().is_empty());
  }

  #[test]
  fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml("max_results = 25\nemail = \"me@example.com\"").unwrap();
    assert_eq!(config.max_results, 25);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.identification(), vec![("email", "me@example.com")]);
  }

  #[test]
  fn test_invalid_toml() {
    assert!(matches!(Config::from_toml("max_results = \"many\""), Err(PapersError::TomlDe(_))));
  }

  #[traced_test]
  #[test]
  fn test_load_or_default() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());

    let present = dir.path().join("config.toml");
    std::fs::write(&present, "base_url = \"http://localhost:1234\"\ntool = \"papers\"").unwrap();
    let config = Config::load_or_default(&present).unwrap();
    assert_eq!(config.base_url, "http://localhost:1234");
    assert_eq!(config.tool.as_deref(), Some("papers"));
  }

  #[test]
  fn test_builders() {
    let config = Config::default()
      .with_base_url("http://127.0.0.1:9")
      .with_max_results(5)
      .with_email("a@b.c")
      .with_api_key("key");
    assert_eq!(config.base_url, "http://127.0.0.1:9");
    assert_eq!(config.max_results, 5);
    assert_eq!(config.identification(), vec![("email", "a@b.c"), ("api_key", "key")]);
  }

  #[test]
  fn test_default_path() {
    assert!(Config::default_path().ends_with("papers/config.toml"));
  }
}
