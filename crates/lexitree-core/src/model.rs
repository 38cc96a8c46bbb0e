//! Domain model: words decomposed into roots and affixes.
//!
//! Identifiers are client-generated UUIDs and never change once assigned.
//! A [`Word`] refers to its root by the root's *text*, not by identifier; the
//! reference may dangle and every lookup through it tolerates that.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Roots ───────────────────────────────────────────────────────────────────

/// A bound morpheme carrying core lexical meaning, e.g. `port`.
/// Unique by `text` within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
  pub id:          Uuid,
  pub text:        String,
  /// Short gloss.
  pub meaning:     String,
  /// Longer explanation.
  pub description: String,
}

impl Root {
  /// Build a root with a freshly generated identifier.
  pub fn new(
    text: impl Into<String>,
    meaning: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      id:          Uuid::new_v4(),
      text:        text.into(),
      meaning:     meaning.into(),
      description: description.into(),
    }
  }
}

// ─── Affixes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffixType {
  Prefix,
  Suffix,
}

impl AffixType {
  /// The string stored in the `type` column and the interchange document.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Prefix => "prefix",
      Self::Suffix => "suffix",
    }
  }
}

impl fmt::Display for AffixType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for AffixType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "prefix" => Ok(Self::Prefix),
      "suffix" => Ok(Self::Suffix),
      other => Err(Error::InvalidData(format!("unknown affix type: {other:?}"))),
    }
  }
}

/// A prefix or suffix morpheme. Unique by `(text, kind)` within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affix {
  pub id:      Uuid,
  pub text:    String,
  #[serde(rename = "type")]
  pub kind:    AffixType,
  pub meaning: String,
}

impl Affix {
  pub fn new(text: impl Into<String>, kind: AffixType, meaning: impl Into<String>) -> Self {
    Self { id: Uuid::new_v4(), text: text.into(), kind, meaning: meaning.into() }
  }
}

// ─── Words ───────────────────────────────────────────────────────────────────

/// A surface word form with its morphological decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  pub id:            Uuid,
  pub text:          String,
  pub meaning:       String,
  /// Text of the owning [`Root`]; empty when the word has no root component.
  pub root:          String,
  pub prefix:        Option<String>,
  pub suffix:        Option<String>,
  /// IPA transcription.
  pub pronunciation: String,
}

/// An example sentence and its translation, owned by a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
  pub id:          Uuid,
  pub text:        String,
  pub translation: String,
  pub word_id:     Uuid,
}

impl ExampleSentence {
  pub fn new(word_id: Uuid, text: impl Into<String>, translation: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      text: text.into(),
      translation: translation.into(),
      word_id,
    }
  }
}

// ─── Root relations ──────────────────────────────────────────────────────────

/// A directed association between two roots, e.g. a morphological family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootRelation {
  pub id:            Uuid,
  pub root1_id:      Uuid,
  pub root2_id:      Uuid,
  pub relation_type: String,
  pub description:   Option<String>,
}

/// The far side of a [`RootRelation`], resolved against the roots table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRoot {
  pub root:          Root,
  pub relation_type: String,
  pub description:   Option<String>,
}

// ─── Learning records ────────────────────────────────────────────────────────

/// Minutes studied, stamped with the local calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningRecord {
  pub id:      Uuid,
  pub date:    NaiveDate,
  pub minutes: u32,
}

// ─── Components ──────────────────────────────────────────────────────────────

/// The morphological role of a parsed word component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
  Root,
  Prefix,
  Suffix,
}

impl ComponentKind {
  /// Map a flat-file TYPE label to a component kind.
  ///
  /// Accepts the Chinese labels used by the bundled word list as well as the
  /// English names (case-insensitive). Returns `None` for anything else.
  pub fn from_label(label: &str) -> Option<Self> {
    match label {
      "词根" => Some(Self::Root),
      "前缀" => Some(Self::Prefix),
      "后缀" => Some(Self::Suffix),
      other if other.eq_ignore_ascii_case("root") => Some(Self::Root),
      other if other.eq_ignore_ascii_case("prefix") => Some(Self::Prefix),
      other if other.eq_ignore_ascii_case("suffix") => Some(Self::Suffix),
      _ => None,
    }
  }

  /// The canonical label written by the flat-file serializer.
  pub fn label(self) -> &'static str {
    match self {
      Self::Root => "词根",
      Self::Prefix => "前缀",
      Self::Suffix => "后缀",
    }
  }

  /// The affix type for prefix/suffix components; `None` for roots.
  pub fn affix_type(self) -> Option<AffixType> {
    match self {
      Self::Root => None,
      Self::Prefix => Some(AffixType::Prefix),
      Self::Suffix => Some(AffixType::Suffix),
    }
  }
}

impl From<AffixType> for ComponentKind {
  fn from(kind: AffixType) -> Self {
    match kind {
      AffixType::Prefix => Self::Prefix,
      AffixType::Suffix => Self::Suffix,
    }
  }
}
