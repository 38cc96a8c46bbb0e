//! Error types for the flat-file word-list codec.

use thiserror::Error;

/// Why a single line was rejected. Never fatal to a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("expected 5 '|'-separated fields, found {found}")]
  FieldCount { found: usize },

  #[error("word field is empty")]
  EmptyWord,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
