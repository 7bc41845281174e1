//! Affiliation classification and email extraction.
//!
//! Classification is a keyword heuristic: an affiliation counts as a company when it
//! mentions a company keyword and no academic keyword. Academic keywords always win,
//! so a pharma-affiliated hospital lab is treated as academic.
//!
//! ```
//! use papers::classify::{extract_email, is_company_affiliation};
//!
//! assert!(is_company_affiliation("Dept of Chemistry, Acme Pharma Inc"));
//! assert!(!is_company_affiliation("Acme Pharma Inc, University Hospital"));
//! assert_eq!(extract_email("contact: a.b@xyz.com"), "a.b@xyz.com");
//! ```

use super::*;

/// Substrings that mark an affiliation as a company.
pub const COMPANY_KEYWORDS: [&str; 8] =
  ["inc", "corp", "ltd", "gmbh", "biotech", "pharma", "therapeutics", "biosciences"];

/// Substrings that mark an affiliation as academic, overriding any company keyword.
pub const ACADEMIC_KEYWORDS: [&str; 6] =
  ["university", "institute", "college", "school", "hospital", "clinic"];

lazy_static! {
  static ref EMAIL: Regex = Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern is valid");
}

/// Returns `true` when the affiliation reads as a company rather than an academic
/// institution.
///
/// Matching is case-insensitive substring matching against [`COMPANY_KEYWORDS`] and
/// [`ACADEMIC_KEYWORDS`].
pub fn is_company_affiliation(affiliation: &str) -> bool {
  let affiliation = affiliation.to_lowercase();
  COMPANY_KEYWORDS.iter().any(|kw| affiliation.contains(kw))
    && !ACADEMIC_KEYWORDS.iter().any(|kw| affiliation.contains(kw))
}

/// Returns the first email-looking substring of `text`, or an empty string.
pub fn extract_email(text: &str) -> &str { EMAIL.find(text).map_or("", |m| m.as_str()) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_company_keyword_without_academic_keyword() {
    for affiliation in [
      "Dept of Chemistry, Acme Pharma Inc",
      "Genentech Inc., South San Francisco, CA",
      "Roche Diagnostics GmbH, Penzberg, Germany",
      "Vertex Therapeutics",
      "Illumina Biosciences, San Diego",
    ] {
      assert!(is_company_affiliation(affiliation), "{affiliation}");
    }
  }

  #[test]
  fn test_academic_keyword_overrides_company_keyword() {
    assert!(!is_company_affiliation("Acme Pharma Inc, University Hospital"));
    assert!(!is_company_affiliation("Biotech Institute of Maryland"));
    assert!(!is_company_affiliation("Mayo Clinic Pharmacology Ltd"));
  }

  #[test]
  fn test_neither_keyword_is_not_company() {
    assert!(!is_company_affiliation("Department of Biology, Boston"));
    assert!(!is_company_affiliation(""));
  }

  #[test]
  fn test_classification_ignores_case() {
    assert_eq!(is_company_affiliation("Pharma GmbH"), is_company_affiliation("pharma gmbh"));
    assert!(is_company_affiliation("PHARMA GMBH"));
    assert!(!is_company_affiliation("ACME PHARMA, STATE UNIVERSITY"));
  }

  #[test]
  fn test_keywords_match_inside_words() {
    // "Princeton" contains "inc"; the heuristic does not look at word boundaries.
    assert!(is_company_affiliation("Princeton Labs"));
  }

  #[test]
  fn test_extract_email() {
    assert_eq!(extract_email("XYZ Biotech Corp, contact: a.b@xyz.com"), "a.b@xyz.com");
    assert_eq!(
      extract_email("first-one@lab.example.org and second@example.com"),
      "first-one@lab.example.org"
    );
    assert_eq!(extract_email("no address here"), "");
    assert_eq!(extract_email("dangling @ sign"), "");
  }

  #[test]
  fn test_extract_email_keeps_trailing_dot() {
    assert_eq!(extract_email("Electronic address: jdoe@acme.com."), "jdoe@acme.com.");
  }
}
