//! Error type for `lexitree-store-sqlite`.
//!
//! Every variant is recoverable at the call site; a failed statement leaves
//! the connection usable for the next one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The store could not be opened, or the connection has been closed.
  #[error("store connection unavailable: {0}")]
  ConnectionFailed(#[source] tokio_rusqlite::Error),

  /// Malformed statement, or a table the statement needs is missing.
  #[error("statement preparation failed: {0}")]
  PrepareFailed(#[source] rusqlite::Error),

  /// Constraint violation or I/O failure while a statement ran.
  #[error("statement execution failed: {0}")]
  ExecutionFailed(#[source] rusqlite::Error),

  /// A stored value could not be decoded into a domain value.
  #[error("invalid data: {0}")]
  InvalidData(String),

  #[error("core error: {0}")]
  Core(#[from] lexitree_core::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(e) => e.into(),
      other => Error::ConnectionFailed(other),
    }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    // SQLITE_ERROR (reported as `ErrorCode::Unknown`) is what sqlite3_prepare
    // returns for syntax errors and unknown tables or columns.
    let at_prepare = match &e {
      rusqlite::Error::InvalidQuery | rusqlite::Error::MultipleStatement => true,
      rusqlite::Error::SqliteFailure(f, _) => f.code == rusqlite::ErrorCode::Unknown,
      _ => false,
    };
    if at_prepare {
      Error::PrepareFailed(e)
    } else {
      Error::ExecutionFailed(e)
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
