//! Record extraction from PubMed `efetch` XML.
//!
//! Every `PubmedArticle` element is handled on its own. An article whose text cannot
//! be read, for example because of an unknown entity reference, is skipped without
//! affecting the others; the skip only shows up in the counters of [`ParsedPapers`]
//! and in debug logs. A document that is not well-formed XML fails as a whole.
//! Missing fields never skip an article: a missing `PMID` gives an empty identifier.
//!
//! ```
//! use papers::parser::parse_papers;
//!
//! let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
//!   <PMID>1</PMID>
//!   <Article><ArticleTitle>T</ArticleTitle><AuthorList><Author>
//!     <LastName>Doe</LastName><ForeName>Jane</ForeName>
//!     <AffiliationInfo><Affiliation>Acme Pharma Inc</Affiliation></AffiliationInfo>
//!   </Author></AuthorList></Article>
//! </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
//!
//! let parsed = parse_papers(xml)?;
//! assert_eq!(parsed.records[0].non_academic_authors, vec!["Jane Doe"]);
//! # Ok::<(), papers::error::PapersError>(())
//! ```

use super::*;

/// Element holding one article.
const ARTICLE: &str = "PubmedArticle";
/// Element holding one affiliation line.
const AFFILIATION_INFO: &str = "AffiliationInfo";
/// Element holding one author.
const AUTHOR: &str = "Author";

/// Outcome of parsing a fetched document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPapers {
  /// Records with at least one company affiliation, in document order
  pub records:         Vec<Record>,
  /// Number of `PubmedArticle` elements seen
  pub articles:        usize,
  /// Articles dropped because they could not be processed
  pub skipped:         usize,
  /// Articles dropped because none of their affiliations is a company
  pub without_company: usize,
}

/// Parses an `efetch` document and keeps the articles with company affiliations.
pub fn parse_papers(xml: &str) -> Result<ParsedPapers> {
  let root = Element::parse(xml)?;
  let mut parsed = ParsedPapers::default();

  for (index, article) in root.descendants(ARTICLE).enumerate() {
    parsed.articles += 1;
    match parse_article(article) {
      Ok(Some(record)) => {
        trace!("Keeping article {}", record.pubmed_id);
        parsed.records.push(record);
      },
      Ok(None) => parsed.without_company += 1,
      Err(e) => {
        debug!("Skipping article #{index}: {e}");
        parsed.skipped += 1;
      },
    }
  }

  debug!(
    "Parsed {} articles: {} kept, {} without company affiliation, {} skipped",
    parsed.articles,
    parsed.records.len(),
    parsed.without_company,
    parsed.skipped
  );
  Ok(parsed)
}

/// Extracts the record for one `PubmedArticle`, or `None` when it has no company
/// affiliation.
///
/// Fails only when the article's text cannot be unescaped.
pub fn parse_article(article: &Element) -> Result<Option<Record>> {
  let pubmed_id =
    article.find_text("PMID")?.map(|pmid| pmid.trim().to_string()).unwrap_or_default();
  let title = article.find_text("ArticleTitle")?.map(|title| title.trim().to_string());
  let publication_date = article
    .find_text("PubDate/Year")?
    .map(|year| year.trim().to_string())
    .filter(|year| !year.is_empty())
    .unwrap_or_else(|| UNKNOWN.to_string());

  let entries = affiliation_entries(article)?;
  Ok(Record::from_entries(pubmed_id, title, publication_date, &entries))
}

/// All affiliation lines below `element`, in document order, paired with their author.
pub fn affiliation_entries(element: &Element) -> Result<Vec<AffiliationEntry>> {
  let mut entries = Vec::new();
  collect_affiliations(element, None, &mut entries)?;
  Ok(entries)
}

/// Walks the tree, remembering the innermost enclosing author.
fn collect_affiliations(
  element: &Element,
  author: Option<&str>,
  out: &mut Vec<AffiliationEntry>,
) -> Result<()> {
  for child in element.elements() {
    match child.name.as_str() {
      AFFILIATION_INFO => {
        let text = child.child("Affiliation").map(Element::text_content).transpose()?;
        let author = child.attribute("AuthorName").or(author).map(String::from);
        out.push(AffiliationEntry::new(text.unwrap_or_default(), author.clone()));
        collect_affiliations(child, author.as_deref(), out)?;
      },
      AUTHOR => {
        let name = author_name(child)?;
        collect_affiliations(child, name.as_deref(), out)?;
      },
      _ => collect_affiliations(child, author, out)?,
    }
  }
  Ok(())
}

/// Display name of an `Author` element: the collective name, or "ForeName LastName".
fn author_name(author: &Element) -> Result<Option<String>> {
  if let Some(collective) = author.child("CollectiveName") {
    let collective = collective.text_content()?;
    let collective = collective.trim();
    if !collective.is_empty() {
      return Ok(Some(collective.to_string()));
    }
  }

  let mut parts = Vec::new();
  for part in ["ForeName", "LastName"] {
    if let Some(element) = author.child(part) {
      let text = element.text_content()?;
      let text = text.trim();
      if !text.is_empty() {
        parts.push(text.to_string());
      }
    }
  }
  let name = parts.join(" ");
  Ok((!name.is_empty()).then_some(name))
}
