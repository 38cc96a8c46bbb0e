//! JSON interchange document.
//!
//! The document is a [`Snapshot`]: one object with `words`, `roots` and
//! `affixes` arrays. Identifiers are written and restored verbatim. Example
//! sentences and root relations are not part of it; a database file backup
//! covers those.

use std::path::Path;

use lexitree_core::store::{Snapshot, VocabularyStore};
use serde::Serialize;

use crate::{Error, Result};

/// Counts gathered while restoring a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
  pub saved:  usize,
  pub failed: usize,
}

pub fn encode_document(doc: &Snapshot) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec_pretty(doc)?)
}

/// Decode a document; any shape mismatch is reported as
/// [`Error::InvalidData`].
pub fn decode_document(bytes: &[u8]) -> Result<Snapshot> { Ok(serde_json::from_slice(bytes)?) }

/// Take a snapshot of `store` and write it to `path` as pretty-printed JSON.
pub async fn export_json<S: VocabularyStore>(store: &S, path: impl AsRef<Path>) -> Result<Snapshot> {
  let path = path.as_ref();
  let doc = store.snapshot().await.map_err(Error::store)?;
  let bytes = encode_document(&doc)?;
  tokio::fs::write(path, bytes).await.map_err(Error::file(path))?;

  tracing::info!(
    ?path,
    words = doc.words.len(),
    roots = doc.roots.len(),
    affixes = doc.affixes.len(),
    "exported interchange document"
  );
  Ok(doc)
}

/// Save every root, then every word, then every affix of `doc`.
///
/// A rejected row is logged and counted; the rest of the document is still
/// applied. Restoring into a non-empty store follows the store's own write
/// rules, so words whose identifier already exists are rejected.
pub async fn restore<S: VocabularyStore>(store: &S, doc: &Snapshot) -> RestoreReport {
  let mut report = RestoreReport::default();

  for root in &doc.roots {
    match store.save_root(root).await {
      Ok(()) => report.saved += 1,
      Err(e) => {
        tracing::warn!(root = %root.text, error = %e, "failed to restore root");
        report.failed += 1;
      }
    }
  }
  for word in &doc.words {
    match store.save_word(word).await {
      Ok(()) => report.saved += 1,
      Err(e) => {
        tracing::warn!(word = %word.text, id = %word.id, error = %e, "failed to restore word");
        report.failed += 1;
      }
    }
  }
  for affix in &doc.affixes {
    match store.save_affix(affix).await {
      Ok(()) => report.saved += 1,
      Err(e) => {
        tracing::warn!(affix = %affix.text, error = %e, "failed to restore affix");
        report.failed += 1;
      }
    }
  }

  tracing::info!(saved = report.saved, failed = report.failed, "restore finished");
  report
}

/// Read the document at `path` and [`restore`] it.
pub async fn restore_json<S: VocabularyStore>(
  store: &S,
  path: impl AsRef<Path>,
) -> Result<RestoreReport> {
  let path = path.as_ref();
  let bytes = tokio::fs::read(path).await.map_err(Error::file(path))?;
  let doc = decode_document(&bytes)?;
  Ok(restore(store, &doc).await)
}
