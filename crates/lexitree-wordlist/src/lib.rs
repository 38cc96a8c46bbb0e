//! Flat-file word-list codec for LexiTree.
//!
//! One entry per line:
//!
//! ```text
//! WORD | TRANSLATION | TEXT:TYPE:MEANING(;TEXT:TYPE:MEANING)* | PRONUNCIATION | "EXAMPLE" ~ "TRANSLATION"
//! ```
//!
//! There is no escaping mechanism for `|`, `;`, `:` or `~`. Pure and
//! synchronous; never touches storage.
//!
//! # Quick start
//!
//! ```
//! use lexitree_wordlist::parse_line;
//!
//! let line = r#"import | 进口 | port:词根:港口;im:前缀:向内 | ɪmˈpɔːrt | "They import goods." ~ "他们进口商品。""#;
//! let entry = parse_line(line).unwrap();
//! assert_eq!(entry.root().map(|c| c.text.as_str()), Some("port"));
//! ```

pub mod error;
mod parse;
mod serialize;

pub use error::{Error, Result};
use lexitree_core::model::ComponentKind;
use serde::{Deserialize, Serialize};

// ─── Public types ────────────────────────────────────────────────────────────

/// One `TEXT:TYPE:MEANING` element of a word's decomposition.
///
/// The TYPE label is kept verbatim so a line can be reassembled exactly;
/// [`Component::kind`] interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
  pub text:    String,
  pub label:   String,
  pub meaning: String,
}

impl Component {
  /// The morphological role, or `None` for an unrecognised label.
  pub fn kind(&self) -> Option<ComponentKind> { ComponentKind::from_label(&self.label) }
}

/// A source-language example sentence and its translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
  pub text:        String,
  /// Empty when the line carries no `~` segment.
  pub translation: String,
}

/// The structured form of one flat-file line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
  pub word:                String,
  pub translation:         String,
  /// Components in source order.
  pub components:          Vec<Component>,
  pub pronunciation:       String,
  pub example:             Example,
  /// Raw component strings skipped for not having exactly three sub-fields.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub rejected_components: Vec<String>,
}

impl VocabularyEntry {
  /// First component of the given kind; later ones are ignored.
  pub fn first_of(&self, kind: ComponentKind) -> Option<&Component> {
    self.components.iter().find(|c| c.kind() == Some(kind))
  }

  pub fn root(&self) -> Option<&Component> { self.first_of(ComponentKind::Root) }

  pub fn prefix(&self) -> Option<&Component> { self.first_of(ComponentKind::Prefix) }

  pub fn suffix(&self) -> Option<&Component> { self.first_of(ComponentKind::Suffix) }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse a single line.
pub fn parse_line(line: &str) -> Result<VocabularyEntry> { parse::parse_line(line) }

/// Parse every non-empty line of `input`.
///
/// Each element pairs the 1-based line number with the outcome for that line;
/// a rejected line does not affect the others. A line holding only
/// whitespace is not empty and comes back as a field-count error.
pub fn parse_many(input: &str) -> Vec<(usize, Result<VocabularyEntry>)> {
  input
    .lines()
    .enumerate()
    .filter(|(_, line)| !line.is_empty())
    .map(|(i, line)| (i + 1, parse::parse_line(line)))
    .collect()
}

/// Reassemble `entry` as a canonical flat-file line (no trailing newline).
pub fn to_line(entry: &VocabularyEntry) -> String { serialize::to_line(entry) }

// ─── Round-trip tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use super::*;

  #[test]
  fn canonical_lines_reassemble_exactly() {
    let lines = [
      r#"import | 进口，输入 | port:词根:港口;im:前缀:向内 | ɪmˈpɔːrt | "They import goods." ~ "他们进口商品。""#,
      r#"portable | 便携的 | port:词根:携带;able:后缀:能够的 | ˈpɔːrtəbl | "A portable radio." ~ "一台便携式收音机。""#,
      r#"transport | 运输 | trans:prefix:穿过;port:root:运 | trænsˈpɔːrt | "Goods are transported by sea.""#,
      r#"report | 报告 | re:前缀:回;port:词根:带 | rɪˈpɔːrt | "" ~ "我写了一份报告。""#,
    ];

    for line in lines {
      let entry = parse_line(line).expect("well-formed line");
      assert_eq!(to_line(&entry), line.trim());
    }
  }

  #[test]
  fn surrounding_whitespace_is_not_part_of_the_line() {
    let line = "  export | 出口 | ex:前缀:向外;port:词根:港口 | ɪkˈspɔːrt | \"We export tea.\" ~ \"我们出口茶叶。\"  \r";
    let entry = parse_line(line).unwrap();
    assert_eq!(to_line(&entry), line.trim());
  }

  #[test]
  fn parse_many_reports_line_numbers() {
    let input = "import|进口\n\n   \nexport | 出口 | ex:前缀:向外 | ɪkˈspɔːrt | \"x\" ~ \"y\"\n";
    let results = parse_many(input);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, 1);
    assert_eq!(results[0].1, Err(Error::FieldCount { found: 2 }));
    assert_eq!(results[1].0, 3);
    assert_eq!(results[1].1, Err(Error::FieldCount { found: 1 }));
    assert_eq!(results[2].0, 4);
    assert_eq!(results[2].1.as_ref().unwrap().word, "export");
  }
}
