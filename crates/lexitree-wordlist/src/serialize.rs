//! Canonical line serializer, the inverse of the parser for well-formed
//! entries.

use crate::{Component, Example, VocabularyEntry};

fn component(c: &Component) -> String { format!("{}:{}:{}", c.text, c.label, c.meaning) }

fn example(e: &Example) -> String {
  if e.translation.is_empty() {
    format!("\"{}\"", e.text)
  } else {
    format!("\"{}\" ~ \"{}\"", e.text, e.translation)
  }
}

pub(crate) fn to_line(entry: &VocabularyEntry) -> String {
  let components: Vec<String> = entry.components.iter().map(component).collect();
  format!(
    "{} | {} | {} | {} | {}",
    entry.word,
    entry.translation,
    components.join(";"),
    entry.pronunciation,
    example(&entry.example),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejected_components_are_not_written() {
    let entry = VocabularyEntry {
      word:                "import".into(),
      translation:         "进口".into(),
      components:          vec![Component {
        text:    "port".into(),
        label:   "词根".into(),
        meaning: "港口".into(),
      }],
      pronunciation:       "ɪmˈpɔːrt".into(),
      example:             Example { text: "x".into(), translation: String::new() },
      rejected_components: vec!["bad".into()],
    };
    assert_eq!(to_line(&entry), "import | 进口 | port:词根:港口 | ɪmˈpɔːrt | \"x\"");
  }
}
