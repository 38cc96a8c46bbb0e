//! Flat-file import.
//!
//! Each parsed line is decomposed into rows and saved in dependency order:
//! roots, then affixes, then the word, then its example sentence. Roots and
//! affixes are upserted by the store, so re-importing a file does not
//! duplicate them. Words and sentences are plain inserts and are duplicated.

use std::{fmt::Display, path::Path};

use lexitree_core::{
  model::{Affix, ComponentKind, ExampleSentence, Root, Word},
  store::VocabularyStore,
};
use lexitree_wordlist::VocabularyEntry;
use serde::Serialize;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Report ──────────────────────────────────────────────────────────────────

/// Counts gathered during one import. Diagnostic only; a partial import is
/// still a successful one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  /// Non-empty lines seen, whitespace-only lines included.
  pub lines:     usize,
  pub parsed:    usize,
  /// Lines the parser rejected.
  pub skipped:   usize,
  /// Rows the store accepted.
  pub persisted: usize,
  /// Rows the store rejected.
  pub failed:    usize,
}

impl ImportReport {
  fn tally<E: Display>(&mut self, outcome: Result<(), E>, what: &str, key: &str) -> bool {
    match outcome {
      Ok(()) => {
        self.persisted += 1;
        true
      }
      Err(e) => {
        tracing::warn!(what, key, error = %e, "failed to save row");
        self.failed += 1;
        false
      }
    }
  }
}

// ─── Decomposition ───────────────────────────────────────────────────────────

/// The rows derived from one vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Records {
  pub roots:    Vec<Root>,
  pub affixes:  Vec<Affix>,
  pub word:     Word,
  /// `None` when the line carries neither an example nor a translation.
  pub sentence: Option<ExampleSentence>,
}

/// Split a parsed entry into store rows.
///
/// Every root component becomes a [`Root`] and every prefix or suffix
/// component an [`Affix`]; components with an unknown label are dropped. The
/// word refers to the first root, prefix and suffix by text.
pub fn decompose(entry: &VocabularyEntry) -> Records {
  let mut roots = Vec::new();
  let mut affixes = Vec::new();

  for c in &entry.components {
    match c.kind() {
      Some(ComponentKind::Root) => roots.push(Root::new(
        c.text.clone(),
        c.meaning.clone(),
        format!("来自单词：{}", entry.word),
      )),
      Some(kind) => {
        if let Some(affix_type) = kind.affix_type() {
          affixes.push(Affix::new(c.text.clone(), affix_type, c.meaning.clone()));
        }
      }
      None => tracing::debug!(word = %entry.word, label = %c.label, "unknown component label"),
    }
  }

  let word = Word {
    id:            Uuid::new_v4(),
    text:          entry.word.clone(),
    meaning:       entry.translation.clone(),
    root:          entry.root().map(|c| c.text.clone()).unwrap_or_default(),
    prefix:        entry.prefix().map(|c| c.text.clone()),
    suffix:        entry.suffix().map(|c| c.text.clone()),
    pronunciation: entry.pronunciation.clone(),
  };

  let example = &entry.example;
  let sentence = (!example.text.is_empty() || !example.translation.is_empty()).then(|| {
    ExampleSentence::new(word.id, example.text.clone(), example.translation.clone())
  });

  Records { roots, affixes, word, sentence }
}

async fn persist<S: VocabularyStore>(store: &S, records: &Records, report: &mut ImportReport) {
  for root in &records.roots {
    report.tally(store.save_root(root).await, "root", &root.text);
  }
  for affix in &records.affixes {
    report.tally(store.save_affix(affix).await, "affix", &affix.text);
  }

  let word = &records.word;
  if !report.tally(store.save_word(word).await, "word", &word.text) {
    return;
  }

  if let Some(sentence) = &records.sentence {
    report.tally(store.save_sentence(sentence).await, "sentence", &word.text);
  }
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Import every line of `content` into `store`.
pub async fn import_str<S: VocabularyStore>(store: &S, content: &str) -> ImportReport {
  let mut report = ImportReport::default();

  for (number, parsed) in lexitree_wordlist::parse_many(content) {
    report.lines += 1;
    let entry = match parsed {
      Ok(entry) => entry,
      Err(e) => {
        tracing::warn!(line = number, error = %e, "skipping unparseable line");
        report.skipped += 1;
        continue;
      }
    };
    report.parsed += 1;

    for raw in &entry.rejected_components {
      tracing::debug!(line = number, component = %raw, "ignoring malformed component");
    }

    persist(store, &decompose(&entry), &mut report).await;
  }

  tracing::info!(
    lines = report.lines,
    parsed = report.parsed,
    persisted = report.persisted,
    failed = report.failed,
    "import finished"
  );
  report
}

/// Read the flat file at `path` and import it.
///
/// A missing file is not an error: nothing is imported and an empty report
/// is returned.
pub async fn import_file<S: VocabularyStore>(
  store: &S,
  path: impl AsRef<Path>,
) -> Result<ImportReport> {
  let path = path.as_ref();
  let content = match tokio::fs::read_to_string(path).await {
    Ok(content) => content,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      tracing::info!(?path, "word list not found, nothing to import");
      return Ok(ImportReport::default());
    }
    Err(e) => return Err(Error::file(path)(e)),
  };

  tracing::debug!(?path, bytes = content.len(), "read word list");
  Ok(import_str(store, &content).await)
}

#[cfg(test)]
mod tests {
  use lexitree_core::model::AffixType;

  use super::*;

  #[test]
  fn decompose_full_entry() {
    let entry = lexitree_wordlist::parse_line(
      r#"import | 进口，输入 | port:词根:港口;im:前缀:向内 | ɪmˈpɔːrt | "They import goods." ~ "他们进口商品。""#,
    )
    .unwrap();
    let records = decompose(&entry);

    assert_eq!(records.roots.len(), 1);
    assert_eq!(records.roots[0].text, "port");
    assert_eq!(records.roots[0].meaning, "港口");
    assert_eq!(records.roots[0].description, "来自单词：import");

    assert_eq!(records.affixes.len(), 1);
    assert_eq!(records.affixes[0].text, "im");
    assert_eq!(records.affixes[0].kind, AffixType::Prefix);

    assert_eq!(records.word.root, "port");
    assert_eq!(records.word.prefix.as_deref(), Some("im"));
    assert_eq!(records.word.suffix, None);
    assert_eq!(records.word.meaning, "进口，输入");

    let sentence = records.sentence.unwrap();
    assert_eq!(sentence.word_id, records.word.id);
    assert_eq!(sentence.text, "They import goods.");
    assert_eq!(sentence.translation, "他们进口商品。");
  }

  #[test]
  fn every_root_component_is_kept_but_word_uses_first() {
    let entry =
      lexitree_wordlist::parse_line(r#"x | y | a:词根:1;b:root:2;z:词性:? | p | """#).unwrap();
    let records = decompose(&entry);

    let texts: Vec<_> = records.roots.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["a", "b"]);
    assert!(records.affixes.is_empty());
    assert_eq!(records.word.root, "a");
    assert!(records.sentence.is_none());
  }

  #[test]
  fn word_without_root_has_empty_reference() {
    let entry = lexitree_wordlist::parse_line(r#"able | 能 | able:后缀:能够 | eɪbl | "Able." "#)
      .unwrap();
    let records = decompose(&entry);
    assert_eq!(records.word.root, "");
    assert_eq!(records.word.suffix.as_deref(), Some("able"));
    assert_eq!(records.affixes[0].kind, AffixType::Suffix);
  }
}
