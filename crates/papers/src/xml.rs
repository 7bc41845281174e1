//! Minimal XML element tree built on `quick-xml`.
//!
//! PubMed documents are small enough to hold in memory, and record extraction needs
//! "first descendant named X" style lookups, so the event stream is folded into a tree
//! of [`Element`]s. Only elements, attributes, text and CDATA are kept; comments,
//! processing instructions and the doctype are dropped.
//!
//! Building the tree checks that the document is well-formed. Character data is kept
//! as written and its entity references are resolved when it is read, so a bad escape
//! only fails the lookup that touches it.
//!
//! ```
//! use papers::xml::Element;
//!
//! let root = Element::parse("<Set><Item id=\"1\"><Name>a &amp; b</Name></Item></Set>")?;
//! let item = root.descendants("Item").next().unwrap();
//! assert_eq!(item.attribute("id"), Some("1"));
//! assert_eq!(root.find_text("Item/Name")?, Some("a & b".to_string()));
//! # Ok::<(), papers::error::PapersError>(())
//! ```

use std::collections::BTreeMap;

use quick_xml::{
  errors::IllFormedError,
  escape::unescape,
  events::{BytesStart, Event},
  Reader,
};

use super::*;

/// Name given to the synthetic element that holds the top-level nodes of a document.
pub const DOCUMENT: &str = "#document";

/// A node inside an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// A child element
  Element(Element),
  /// Character data as written in the document, entity references unresolved
  Text(String),
  /// Contents of a CDATA section
  CData(String),
}

/// An XML element with its attributes and ordered child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
  /// Qualified tag name
  pub name:       String,
  /// Unescaped attribute values by name
  pub attributes: BTreeMap<String, String>,
  /// Child nodes in document order
  pub children:   Vec<Node>,
}

impl Element {
  /// Creates an empty element called `name`.
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), ..Self::default() } }

  /// Parses a whole document into a tree rooted at a synthetic [`DOCUMENT`] element.
  ///
  /// Fails on malformed markup, mismatched or missing end tags and invalid escapes in
  /// attribute values.
  pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut current = Element::new(DOCUMENT);

    loop {
      match reader.read_event()? {
        Event::Start(ref e) => {
          let element = Element::from_start(e)?;
          stack.push(std::mem::replace(&mut current, element));
        },
        Event::Empty(ref e) => current.children.push(Node::Element(Element::from_start(e)?)),
        Event::Text(e) => {
          let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
          if !text.is_empty() {
            current.children.push(Node::Text(text));
          }
        },
        Event::CData(e) => {
          current.children.push(Node::CData(String::from_utf8_lossy(&e.into_inner()).into_owned()));
        },
        Event::End(_) =>
          if let Some(parent) = stack.pop() {
            let finished = std::mem::replace(&mut current, parent);
            current.children.push(Node::Element(finished));
          },
        Event::Eof => break,
        _ => (),
      }
    }

    if !stack.is_empty() {
      return Err(PapersError::Xml(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(
        current.name,
      ))));
    }
    Ok(current)
  }

  /// Element for a start or empty tag, with its attributes.
  fn from_start(start: &BytesStart) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes().flatten() {
      let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
      element.attributes.insert(key, attr.unescape_value()?.into_owned());
    }
    Ok(element)
  }

  /// Value of the attribute `key`, if present.
  pub fn attribute(&self, key: &str) -> Option<&str> {
    self.attributes.get(key).map(String::as_str)
  }

  /// Child elements in document order.
  pub fn elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|node| match node {
      Node::Element(element) => Some(element),
      _ => None,
    })
  }

  /// First child element called `name`.
  pub fn child(&self, name: &str) -> Option<&Element> {
    self.elements().find(|element| element.name == name)
  }

  /// All descendant elements called `name`, in document order, excluding `self`.
  pub fn descendants<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> + 'a {
    let name = name.to_owned();
    let mut pending: Vec<&Element> = self.elements().collect();
    pending.reverse();
    std::iter::from_fn(move || {
      while let Some(element) = pending.pop() {
        let before = pending.len();
        pending.extend(element.elements());
        pending[before..].reverse();
        if element.name == name {
          return Some(element);
        }
      }
      None
    })
  }

  /// First element matching `path`, searched anywhere below `self`.
  ///
  /// The first path segment matches descendants at any depth, each following segment
  /// matches direct children: `"PubDate/Year"` finds the first `Year` child of any
  /// `PubDate` element.
  pub fn find(&self, path: &str) -> Option<&Element> {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let first = segments.next()?;
    let rest: Vec<&str> = segments.collect();
    self.descendants(first).find_map(|element| element.resolve(&rest))
  }

  /// Text content of the first element matching `path`, see [`Element::find`].
  pub fn find_text(&self, path: &str) -> Result<Option<String>> {
    self.find(path).map(Element::text_content).transpose()
  }

  /// Concatenated text of this element's direct text and CDATA children.
  ///
  /// Fails with [`PapersError::Escape`] when the text holds an unknown or unterminated
  /// entity reference.
  pub fn text(&self) -> Result<String> {
    let mut out = String::new();
    for node in &self.children {
      match node {
        Node::Text(text) => out.push_str(&unescape(text)?),
        Node::CData(text) => out.push_str(text),
        Node::Element(_) => (),
      }
    }
    Ok(out)
  }

  /// Concatenated text of this element and all of its descendants, in document order.
  pub fn text_content(&self) -> Result<String> {
    let mut out = String::new();
    self.collect_text(&mut out)?;
    Ok(out)
  }

  /// Appends all descendant text to `out`.
  fn collect_text(&self, out: &mut String) -> Result<()> {
    for node in &self.children {
      match node {
        Node::Text(text) => out.push_str(&unescape(text)?),
        Node::CData(text) => out.push_str(text),
        Node::Element(element) => element.collect_text(out)?,
      }
    }
    Ok(())
  }

  /// Follows `segments` through direct children, trying every matching branch.
  fn resolve(&self, segments: &[&str]) -> Option<&Element> {
    match segments.split_first() {
      None => Some(self),
      Some((head, rest)) =>
        self.elements().filter(|element| element.name == *head).find_map(|el| el.resolve(rest)),
    }
  }
}

impl Display for Element {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "<{}> ({} children)", self.name, self.children.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"<?xml version="1.0"?>
<!DOCTYPE Set>
<Set>
  <A n="1"><B>first</B><C><B>nested</B></C></A>
  <A n="2"><B>second &amp; more</B><Empty flag="yes"/></A>
  <D><![CDATA[raw <text>]]></D>
  <Title>Effect of <i>E. coli</i> on mice</Title>
</Set>"#;

  #[test]
  fn test_parse_builds_tree() {
    let root = Element::parse(SAMPLE).unwrap();
    assert_eq!(root.name, DOCUMENT);
    let set = root.child("Set").unwrap();
    assert_eq!(set.elements().count(), 4);
    assert_eq!(set.elements().filter(|e| e.name == "A").count(), 2);
  }

  #[test]
  fn test_descendants_are_preorder() {
    let root = Element::parse(SAMPLE).unwrap();
    let texts: Vec<String> = root.descendants("B").map(|b| b.text().unwrap()).collect();
    assert_eq!(texts, vec!["first", "nested", "second & more"]);
  }

  #[test]
  fn test_descendants_outlive_the_name() {
    let root = Element::parse(SAMPLE).unwrap();
    let found: Vec<&Element> = {
      let name = String::from("B");
      root.descendants(&name).collect()
    };
    assert_eq!(found.len(), 3);

    let path = format!("{}/{}", "C", "B");
    let nested = root.find(&path);
    drop(path);
    assert_eq!(nested.map(|b| b.text().unwrap()).as_deref(), Some("nested"));
  }

  #[test]
  fn test_attributes_and_empty_elements() {
    let root = Element::parse(SAMPLE).unwrap();
    let numbers: Vec<&str> = root.descendants("A").filter_map(|a| a.attribute("n")).collect();
    assert_eq!(numbers, vec!["1", "2"]);
    assert_eq!(root.find("Empty").and_then(|e| e.attribute("flag")), Some("yes"));
    assert_eq!(root.find_text("Empty").unwrap(), Some(String::new()));
  }

  #[test]
  fn test_find_path() {
    let root = Element::parse(SAMPLE).unwrap();
    assert_eq!(root.find_text("A/B").unwrap().as_deref(), Some("first"));
    assert_eq!(root.find_text("C/B").unwrap().as_deref(), Some("nested"));
    assert_eq!(root.find_text("A/Missing").unwrap(), None);
    assert!(root.find("").is_none());
  }

  #[test]
  fn test_find_path_tries_every_branch() {
    let root = Element::parse("<R><P><Other/></P><P><Year>2021</Year></P></R>").unwrap();
    assert_eq!(root.find_text("P/Year").unwrap().as_deref(), Some("2021"));
  }

  #[test]
  fn test_text_content_includes_inline_markup() {
    let root = Element::parse(SAMPLE).unwrap();
    let title = root.find("Title").unwrap();
    assert_eq!(title.text().unwrap(), "Effect of  on mice");
    assert_eq!(title.text_content().unwrap(), "Effect of E. coli on mice");
    assert_eq!(root.find_text("D").unwrap().as_deref(), Some("raw <text>"));
  }

  #[test]
  fn test_bad_escape_fails_only_where_read() {
    let root = Element::parse("<R><Good>a &lt; b</Good><Bad>AT&T &bogus;</Bad></R>").unwrap();
    assert_eq!(root.find_text("Good").unwrap().as_deref(), Some("a < b"));
    assert!(matches!(root.find_text("Bad"), Err(PapersError::Escape(_))));
    assert!(matches!(root.text_content(), Err(PapersError::Escape(_))));
  }

  #[test]
  fn test_empty_document() {
    let root = Element::parse("").unwrap();
    assert!(root.children.is_empty());
  }

  #[test]
  fn test_mismatched_tags_fail() {
    assert!(matches!(Element::parse("<a><b></a>"), Err(PapersError::Xml(_))));
  }

  #[test]
  fn test_unclosed_elements_fail() {
    let err = Element::parse("<Set><Item><Name>cut off").unwrap_err();
    assert!(matches!(
      err,
      PapersError::Xml(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(ref name)))
        if name == "Name"
    ));
  }
}
