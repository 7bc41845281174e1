//! Records produced by the parser.
//!
//! An [`AffiliationEntry`] is one affiliation line as it appears in the XML. A
//! [`Record`] is the filtered view of one article and only exists when at least one
//! of the article's entries is a company affiliation.

use super::*;
use crate::classify::{extract_email, is_company_affiliation};

/// Placeholder used for a missing publication year or author name.
pub const UNKNOWN: &str = "Unknown";

/// One affiliation line attached to an author.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AffiliationEntry {
  /// Raw affiliation text, empty when the element had none
  pub text:   String,
  /// Name of the author the affiliation belongs to, when known
  pub author: Option<String>,
}

impl AffiliationEntry {
  /// Creates an entry from its text and optional author.
  pub fn new(text: impl Into<String>, author: Option<String>) -> Self {
    Self { text: text.into(), author }
  }
}

/// A publication with at least one company-affiliated author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  /// PubMed identifier
  pub pubmed_id:            String,
  /// Article title, when the article has one
  pub title:                Option<String>,
  /// Publication year, or [`UNKNOWN`]
  pub publication_date:     String,
  /// Authors of company affiliations, in encounter order, duplicates kept
  pub non_academic_authors: Vec<String>,
  /// Distinct company affiliations, in first-seen order
  pub company_affiliations: Vec<String>,
  /// First email found in any affiliation, or empty
  pub corresponding_email:  String,
}

/// Flat CSV row for a [`Record`]; field order is the column order.
#[derive(Debug, Serialize)]
pub struct Row<'a> {
  /// PubMed identifier
  #[serde(rename = "PubmedID")]
  pub pubmed_id:            &'a str,
  /// Title, empty when absent
  #[serde(rename = "Title")]
  pub title:                &'a str,
  /// Publication year
  #[serde(rename = "Publication Date")]
  pub publication_date:     &'a str,
  /// Comma-joined author names
  #[serde(rename = "Non-academic Author(s)")]
  pub non_academic_authors: String,
  /// Comma-joined company affiliations
  #[serde(rename = "Company Affiliation(s)")]
  pub company_affiliations: String,
  /// Corresponding author email
  #[serde(rename = "Corresponding Author Email")]
  pub corresponding_email:  &'a str,
}

impl Record {
  /// Builds the record for one article from its affiliation entries.
  ///
  /// Returns `None` when no entry is a company affiliation. Only entries whose text
  /// contains `@` are searched for an email, and the first one found wins.
  pub fn from_entries(
    pubmed_id: String,
    title: Option<String>,
    publication_date: String,
    entries: &[AffiliationEntry],
  ) -> Option<Self> {
    let mut non_academic_authors = Vec::new();
    let mut company_affiliations: Vec<String> = Vec::new();
    let mut corresponding_email = String::new();

    for entry in entries {
      if is_company_affiliation(&entry.text) {
        if !company_affiliations.contains(&entry.text) {
          company_affiliations.push(entry.text.clone());
        }
        non_academic_authors.push(entry.author.clone().unwrap_or_else(|| UNKNOWN.to_string()));
      }

      if entry.text.contains('@') && corresponding_email.is_empty() {
        corresponding_email = extract_email(&entry.text).to_string();
      }
    }

    if company_affiliations.is_empty() {
      return None;
    }

    Some(Self {
      pubmed_id,
      title,
      publication_date,
      non_academic_authors,
      company_affiliations,
      corresponding_email,
    })
  }

  /// Flattens the record into display strings for output.
  pub fn row(&self) -> Row<'_> {
    Row {
      pubmed_id:            &self.pubmed_id,
      title:                self.title.as_deref().unwrap_or_default(),
      publication_date:     &self.publication_date,
      non_academic_authors: self.non_academic_authors.join(", "),
      company_affiliations: self.company_affiliations.join(", "),
      corresponding_email:  &self.corresponding_email,
    }
  }
}

impl Display for Record {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({}): {}", self.pubmed_id, self.publication_date, self.title.as_deref().unwrap_or(""))
  }
}
