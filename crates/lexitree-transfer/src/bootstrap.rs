//! First-run helpers for the host application.

use std::path::Path;

use lexitree_core::store::VocabularyStore;

use crate::{Error, ImportReport, Result, import};

/// Copy the bundled word list at `source` to `dest` unless `dest` exists.
///
/// Creates the parent directory of `dest` as needed. Returns `true` when a
/// copy was made.
pub async fn seed_words_file(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<bool> {
  let (source, dest) = (source.as_ref(), dest.as_ref());

  if tokio::fs::try_exists(dest).await.map_err(Error::file(dest))? {
    tracing::debug!(?dest, "word list already present");
    return Ok(false);
  }

  if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .map_err(Error::file(parent))?;
  }
  tokio::fs::copy(source, dest)
    .await
    .map_err(Error::file(source))?;

  tracing::info!(?source, ?dest, "seeded word list");
  Ok(true)
}

/// Import the flat file at `path` if the store holds no words yet.
///
/// Returns `None` when the store was already populated.
pub async fn ensure_populated<S: VocabularyStore>(
  store: &S,
  path: impl AsRef<Path>,
) -> Result<Option<ImportReport>> {
  let stats = store.stats().await.map_err(Error::store)?;
  if stats.words > 0 {
    tracing::debug!(words = stats.words, "store already populated");
    return Ok(None);
  }
  import::import_file(store, path).await.map(Some)
}
