//! Writing the store back out as a flat word list.

use std::{collections::HashMap, path::Path};

use lexitree_core::{
  model::{AffixType, ComponentKind, Word},
  store::VocabularyStore,
};
use lexitree_wordlist::{Component, Example, VocabularyEntry};

use crate::{Error, Result};

/// Meanings of the stored roots and affixes, keyed by natural key.
struct Glossary {
  roots:   HashMap<String, String>,
  affixes: HashMap<(AffixType, String), String>,
}

impl Glossary {
  async fn load<S: VocabularyStore>(store: &S) -> Result<Self> {
    let roots = store
      .all_roots()
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|r| (r.text, r.meaning))
      .collect();
    let affixes = store
      .affixes(None)
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|a| ((a.kind, a.text), a.meaning))
      .collect();
    Ok(Self { roots, affixes })
  }

  fn component(&self, kind: ComponentKind, text: &str) -> Component {
    let meaning = match kind.affix_type() {
      None => self.roots.get(text),
      Some(t) => self.affixes.get(&(t, text.to_owned())),
    };
    Component {
      text:    text.to_owned(),
      label:   kind.label().to_owned(),
      meaning: meaning.cloned().unwrap_or_default(),
    }
  }

  fn components(&self, word: &Word) -> Vec<Component> {
    let mut out = Vec::new();
    if !word.root.is_empty() {
      out.push(self.component(ComponentKind::Root, &word.root));
    }
    if let Some(prefix) = &word.prefix {
      out.push(self.component(ComponentKind::Prefix, prefix));
    }
    if let Some(suffix) = &word.suffix {
      out.push(self.component(ComponentKind::Suffix, suffix));
    }
    out
  }
}

/// Write one line per stored word to `path`, in word order.
///
/// Components are rebuilt from the word's root, prefix and suffix references
/// with meanings looked up in the root and affix tables. The example is the
/// word's oldest sentence. Returns the number of lines written.
pub async fn export_flat_file<S: VocabularyStore>(
  store: &S,
  path: impl AsRef<Path>,
) -> Result<usize> {
  let path = path.as_ref();
  let glossary = Glossary::load(store).await?;
  let words = store.all_words().await.map_err(Error::store)?;

  let mut out = String::new();
  for word in &words {
    let example = store
      .sentences_for_word(word.id)
      .await
      .map_err(Error::store)?
      .into_iter()
      .next()
      .map(|s| Example { text: s.text, translation: s.translation })
      .unwrap_or_default();

    let entry = VocabularyEntry {
      word: word.text.clone(),
      translation: word.meaning.clone(),
      components: glossary.components(word),
      pronunciation: word.pronunciation.clone(),
      example,
      rejected_components: Vec::new(),
    };
    out.push_str(&lexitree_wordlist::to_line(&entry));
    out.push('\n');
  }

  tokio::fs::write(path, out).await.map_err(Error::file(path))?;
  tracing::info!(?path, words = words.len(), "wrote word list");
  Ok(words.len())
}
