//! Line parser.
//!
//! Pipeline:
//!   raw line
//!     └─ split on '|'           → exactly 5 trimmed fields
//!          ├─ split on ';' / ':' → Vec<Component> (bad pieces skipped)
//!          └─ split on '~'       → Example

use crate::{
  Component, Example, VocabularyEntry,
  error::{Error, Result},
};

const FIELD_SEPARATOR: char = '|';
const COMPONENT_SEPARATOR: char = ';';
const SUBFIELD_SEPARATOR: char = ':';
const SENTENCE_SEPARATOR: char = '~';

fn is_quote(c: char) -> bool { matches!(c, '"' | '“' | '”') }

/// Trim whitespace, then surrounding quote characters.
fn unquote(s: &str) -> &str { s.trim().trim_matches(is_quote) }

/// `TEXT:TYPE:MEANING`; anything other than three sub-fields is rejected.
fn parse_component(raw: &str) -> Option<Component> {
  let parts: Vec<&str> = raw.split(SUBFIELD_SEPARATOR).map(str::trim).collect();
  let [text, label, meaning] = parts.as_slice() else {
    return None;
  };
  Some(Component {
    text:    (*text).to_string(),
    label:   (*label).to_string(),
    meaning: (*meaning).to_string(),
  })
}

fn parse_components(field: &str) -> (Vec<Component>, Vec<String>) {
  let mut components = Vec::new();
  let mut rejected = Vec::new();
  for raw in field.split(COMPONENT_SEPARATOR) {
    if raw.trim().is_empty() {
      continue;
    }
    match parse_component(raw) {
      Some(c) => components.push(c),
      None => rejected.push(raw.trim().to_string()),
    }
  }
  (components, rejected)
}

fn parse_example(field: &str) -> Example {
  let mut segments = field.split(SENTENCE_SEPARATOR);
  let text = segments.next().map(unquote).unwrap_or_default();
  let translation = segments.next().map(unquote).unwrap_or_default();
  Example { text: text.to_string(), translation: translation.to_string() }
}

pub(crate) fn parse_line(line: &str) -> Result<VocabularyEntry> {
  let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
  let [word, translation, components, pronunciation, example] = fields.as_slice()
  else {
    return Err(Error::FieldCount { found: fields.len() });
  };

  if word.is_empty() {
    return Err(Error::EmptyWord);
  }

  let (components, rejected_components) = parse_components(components);

  Ok(VocabularyEntry {
    word: (*word).to_string(),
    translation: (*translation).to_string(),
    components,
    pronunciation: (*pronunciation).to_string(),
    example: parse_example(example),
    rejected_components,
  })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use lexitree_core::model::ComponentKind;

  use super::*;

  const IMPORT: &str = "import | 进口，输入 | port:词根:港口;im:前缀:向内 | ɪmˈpɔːrt | \
                        \"They import goods.\" ~ \"他们进口商品。\"";

  #[test]
  fn full_line() {
    let e = parse_line(IMPORT).unwrap();
    assert_eq!(e.word, "import");
    assert_eq!(e.translation, "进口，输入");
    assert_eq!(e.pronunciation, "ɪmˈpɔːrt");
    assert_eq!(e.components.len(), 2);

    let root = e.root().unwrap();
    assert_eq!(root.text, "port");
    assert_eq!(root.meaning, "港口");

    let prefix = e.prefix().unwrap();
    assert_eq!(prefix.text, "im");
    assert_eq!(prefix.meaning, "向内");

    assert!(e.suffix().is_none());
    assert_eq!(e.example.text, "They import goods.");
    assert_eq!(e.example.translation, "他们进口商品。");
    assert!(e.rejected_components.is_empty());
  }

  #[test]
  fn too_few_fields_rejected() {
    assert_eq!(parse_line("import|进口"), Err(Error::FieldCount { found: 2 }));
  }

  #[test]
  fn too_many_fields_rejected() {
    let line = "a | b | c:词根:d | e | \"f\" ~ \"g\" | extra";
    assert_eq!(parse_line(line), Err(Error::FieldCount { found: 6 }));
  }

  #[test]
  fn empty_word_rejected() {
    let line = " | 进口 | port:词根:港口 | ɪmˈpɔːrt | \"x\"";
    assert_eq!(parse_line(line), Err(Error::EmptyWord));
  }

  #[test]
  fn literal_colon_in_meaning_misparses_component() {
    let line = "import | 进口 | port:词根:港:口;im:前缀:向内 | ɪmˈpɔːrt | \"x\" ~ \"y\"";
    let e = parse_line(line).unwrap();
    // The root piece has four sub-fields and is dropped; the line survives.
    assert!(e.root().is_none());
    assert_eq!(e.prefix().unwrap().text, "im");
    assert_eq!(e.rejected_components, vec!["port:词根:港:口".to_string()]);
  }

  #[test]
  fn first_component_of_a_kind_wins() {
    let line = "inexport | x | in:前缀:不;ex:前缀:出;port:词根:港口 | x | \"x\"";
    let e = parse_line(line).unwrap();
    assert_eq!(e.prefix().unwrap().text, "in");
    assert_eq!(
      e.components
        .iter()
        .filter(|c| c.kind() == Some(ComponentKind::Prefix))
        .count(),
      2
    );
  }

  #[test]
  fn unknown_label_is_kept_but_has_no_kind() {
    let line = "porter | 搬运工 | port:词根:搬运;er:施动:人 | ˈpɔːrtər | \"x\"";
    let e = parse_line(line).unwrap();
    assert_eq!(e.components.len(), 2);
    assert_eq!(e.components[1].kind(), None);
    assert!(e.suffix().is_none());
  }

  #[test]
  fn example_without_translation() {
    let e = parse_line("a | b | c:词根:d | e | \"Only English.\"").unwrap();
    assert_eq!(e.example.text, "Only English.");
    assert_eq!(e.example.translation, "");
  }

  #[test]
  fn curly_quotes_are_stripped() {
    let e = parse_line("a | b | c:词根:d | e | “Hello.” ~ “你好。”").unwrap();
    assert_eq!(e.example.text, "Hello.");
    assert_eq!(e.example.translation, "你好。");
  }

  #[test]
  fn trailing_separator_ignored() {
    let e = parse_line("a | b | port:词根:港口; | e | \"x\"").unwrap();
    assert_eq!(e.components.len(), 1);
    assert!(e.rejected_components.is_empty());
  }
}
