//! Error type for `lexitree-transfer`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A flat file or interchange document could not be read, written or
  /// copied.
  #[error("file operation failed on {path:?}: {source}")]
  FileOperationFailed {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The interchange document is not valid JSON or does not have the
  /// `words` / `roots` / `affixes` shape.
  #[error("invalid interchange document: {0}")]
  InvalidData(#[from] serde_json::Error),

  /// Any error raised by the store backend.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }

  pub(crate) fn file(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Error::FileOperationFailed { path, source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
