//! CSV serialization of filtered records.
//!
//! The header row comes from the field names of [`Row`], one data row follows per
//! record in input order. Writing an empty record list is a no-op: no file is created.

use std::io::Write;

use super::*;

/// What a write call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
  /// There were no records, nothing was written
  Empty,
  /// Records were written to this file
  Written(PathBuf),
}

impl Display for WriteOutcome {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Empty => write!(f, "No papers to write."),
      Self::Written(path) => write!(f, "Results saved to {}", path.display()),
    }
  }
}

/// Writes `records` as CSV to the file at `path`, replacing it if it exists.
///
/// ```no_run
/// use papers::output::{write_csv, WriteOutcome};
///
/// let outcome = write_csv(&[], "papers.csv")?;
/// assert_eq!(outcome, WriteOutcome::Empty);
/// # Ok::<(), papers::error::PapersError>(())
/// ```
pub fn write_csv(records: &[Record], path: impl AsRef<Path>) -> Result<WriteOutcome> {
  let path = path.as_ref();
  if records.is_empty() {
    debug!("No records, not creating {}", path.display());
    return Ok(WriteOutcome::Empty);
  }

  let file = std::fs::File::create(path)?;
  write_records(records, file)?;
  debug!("Wrote {} records to {}", records.len(), path.display());
  Ok(WriteOutcome::Written(path.to_path_buf()))
}

/// Writes `records` as CSV to any writer. Writes nothing when `records` is empty.
pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<()> {
  if records.is_empty() {
    return Ok(());
  }

  let mut csv = csv::Writer::from_writer(writer);
  for record in records {
    csv.serialize(record.row())?;
  }
  csv.flush()?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: &str, title: Option<&str>, affiliations: &[&str]) -> Record {
    Record {
      pubmed_id:            id.into(),
      title:                title.map(String::from),
      publication_date:     "2024".into(),
      non_academic_authors: vec!["Jane Doe".into(), "Unknown".into()],
      company_affiliations: affiliations.iter().map(|a| a.to_string()).collect(),
      corresponding_email:  "jane@acme.com".into(),
    }
  }

  #[traced_test]
  #[test]
  fn test_empty_records_write_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let outcome = write_csv(&[], &path).unwrap();
    assert_eq!(outcome, WriteOutcome::Empty);
    assert_eq!(outcome.to_string(), "No papers to write.");
    assert!(!path.exists());

    let mut buffer = Vec::new();
    write_records(&[], &mut buffer).unwrap();
    assert!(buffer.is_empty());
  }

  #[test]
  fn test_header_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let records = vec![
      record("1", Some("Plain title"), &["Acme Inc"]),
      record("2", None, &["Acme Inc", "Beta Pharma, Basel"]),
    ];

    let outcome = write_csv(&records, &path).unwrap();
    assert_eq!(outcome, WriteOutcome::Written(path.clone()));
    assert_eq!(outcome.to_string(), format!("Results saved to {}", path.display()));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
      lines[0],
      "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding \
       Author Email"
    );
    assert_eq!(lines[1], "1,Plain title,2024,\"Jane Doe, Unknown\",Acme Inc,jane@acme.com");
    assert_eq!(
      lines[2],
      "2,,2024,\"Jane Doe, Unknown\",\"Acme Inc, Beta Pharma, Basel\",jane@acme.com"
    );
    assert_eq!(lines.len(), 3);
  }

  #[test]
  fn test_quotes_are_escaped() {
    let mut buffer = Vec::new();
    write_records(&[record("3", Some("The \"best\" drug"), &["Acme Inc"])], &mut buffer).unwrap();
    let content = String::from_utf8(buffer).unwrap();
    assert!(content.contains("3,\"The \"\"best\"\" drug\",2024"));
  }

  #[test]
  fn test_existing_file_is_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    std::fs::write(&path, "stale contents that are longer than the new file\n".repeat(20)).unwrap();

    write_csv(&[record("4", None, &["Acme Inc"])], &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 2);
  }
}
