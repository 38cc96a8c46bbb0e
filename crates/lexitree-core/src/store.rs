//! The `VocabularyStore` trait and supporting types.
//!
//! Implemented by storage backends (e.g. `lexitree-store-sqlite`). The
//! import/export coordinator and the host application depend on this
//! abstraction, not on a concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{
  Affix, AffixType, ExampleSentence, LearningRecord, RelatedRoot, Root,
  RootRelation, Word,
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A consistent copy of the words, roots and affixes in a store.
///
/// This is also the interchange document: serialised as one object with three
/// arrays. Example sentences and root relations are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  pub words:   Vec<Word>,
  pub roots:   Vec<Root>,
  pub affixes: Vec<Affix>,
}

/// Row counts, used for empty-store detection and profile statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
  pub words:     u64,
  pub roots:     u64,
  pub affixes:   u64,
  pub sentences: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a LexiTree vocabulary store backend.
///
/// Write semantics differ per entity:
///
/// - roots and affixes are upserted by natural key (`text`, `text` + type);
///   the first identifier stored for a key is kept;
/// - words, sentences, relations and learning records are plain inserts, so
///   saving logically identical data twice produces two rows.
///
/// References between entities (word → root text, sentence → word, relation
/// → roots) are not validated on write. Reads through a dangling reference
/// return an empty list or `None`.
pub trait VocabularyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn stats(&self) -> impl Future<Output = Result<StoreStats, Self::Error>> + Send + '_;

  // ── Roots ─────────────────────────────────────────────────────────────

  /// Insert a root, or replace the meaning/description of the root with
  /// the same text.
  fn save_root<'a>(
    &'a self,
    root: &'a Root,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All roots ordered by text.
  fn all_roots(&self) -> impl Future<Output = Result<Vec<Root>, Self::Error>> + Send + '_;

  fn root_by_text<'a>(
    &'a self,
    text: &'a str,
  ) -> impl Future<Output = Result<Option<Root>, Self::Error>> + Send + 'a;

  // ── Affixes ───────────────────────────────────────────────────────────

  /// Insert an affix, or replace the meaning of the affix with the same
  /// text and type.
  fn save_affix<'a>(
    &'a self,
    affix: &'a Affix,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Affixes ordered by text, optionally restricted to one type.
  fn affixes(
    &self,
    kind: Option<AffixType>,
  ) -> impl Future<Output = Result<Vec<Affix>, Self::Error>> + Send + '_;

  // ── Words ─────────────────────────────────────────────────────────────

  /// Insert a word. Fails if the identifier is already taken.
  fn save_word<'a>(
    &'a self,
    word: &'a Word,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All words ordered by text.
  fn all_words(&self) -> impl Future<Output = Result<Vec<Word>, Self::Error>> + Send + '_;

  /// Words whose root reference equals `root_text`, ordered by text.
  fn words_for_root<'a>(
    &'a self,
    root_text: &'a str,
  ) -> impl Future<Output = Result<Vec<Word>, Self::Error>> + Send + 'a;

  // ── Example sentences ─────────────────────────────────────────────────

  fn save_sentence<'a>(
    &'a self,
    sentence: &'a ExampleSentence,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Sentences owned by `word_id`, oldest first.
  fn sentences_for_word(
    &self,
    word_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ExampleSentence>, Self::Error>> + Send + '_;

  /// One sentence belonging to any word of `root_text`, chosen uniformly at
  /// random. `None` when no such sentence exists.
  fn random_example_for_root<'a>(
    &'a self,
    root_text: &'a str,
  ) -> impl Future<Output = Result<Option<ExampleSentence>, Self::Error>> + Send + 'a;

  // ── Root relations ────────────────────────────────────────────────────

  fn save_relation<'a>(
    &'a self,
    relation: &'a RootRelation,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Roots related to `root` (as the first side of a relation), ordered by
  /// the related root's text.
  fn relations_for<'a>(
    &'a self,
    root: &'a Root,
  ) -> impl Future<Output = Result<Vec<RelatedRoot>, Self::Error>> + Send + 'a;

  // ── Learning records ──────────────────────────────────────────────────

  /// Append a record stamped with today's local date.
  fn record_learning_minutes(
    &self,
    minutes: u32,
  ) -> impl Future<Output = Result<LearningRecord, Self::Error>> + Send + '_;

  /// Append a record stamped with `date`.
  fn record_learning_minutes_on(
    &self,
    date: NaiveDate,
    minutes: u32,
  ) -> impl Future<Output = Result<LearningRecord, Self::Error>> + Send + '_;

  /// Sum of minutes recorded for today's local date.
  fn today_learning_minutes(&self) -> impl Future<Output = Result<u32, Self::Error>> + Send + '_;

  fn learning_minutes_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + '_;

  // ── Export ────────────────────────────────────────────────────────────

  /// Read all words, roots and affixes as one unit; no other store call is
  /// interleaved while the snapshot is taken.
  fn snapshot(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;
}
