//! Import/export coordinator for LexiTree.
//!
//! Moves vocabulary between a [`VocabularyStore`] and two external forms:
//!
//! - the flat word-list file (`lexitree-wordlist` line format), imported line
//!   by line and optionally written back out;
//! - the JSON interchange document, a [`Snapshot`] of words, roots and
//!   affixes.
//!
//! Batches never abort on a single bad line or a single rejected row. Each
//! operation returns a report with the counts and logs the individual
//! failures.
//!
//! [`VocabularyStore`]: lexitree_core::store::VocabularyStore
//! [`Snapshot`]: lexitree_core::store::Snapshot

pub mod bootstrap;
pub mod error;
pub mod flatfile;
pub mod import;
pub mod interchange;

pub use bootstrap::{ensure_populated, seed_words_file};
pub use error::{Error, Result};
pub use flatfile::export_flat_file;
pub use import::{ImportReport, Records, decompose, import_file, import_str};
pub use interchange::{
  RestoreReport, decode_document, encode_document, export_json, restore, restore_json,
};

#[cfg(test)]
mod tests;
