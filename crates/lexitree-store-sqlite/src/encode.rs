//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, dates as `YYYY-MM-DD`,
//! affix types as `prefix` / `suffix`.

use chrono::NaiveDate;
use lexitree_core::model::{Affix, AffixType, ExampleSentence, RelatedRoot, Root, Word};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::InvalidData(format!("bad date {s:?}: {e}")))
}

// ─── AffixType ────────────────────────────────────────────────────────────────

pub fn encode_affix_type(k: AffixType) -> &'static str { k.as_str() }

pub fn decode_affix_type(s: &str) -> Result<AffixType> { Ok(s.parse()?) }

// ─── Minutes ──────────────────────────────────────────────────────────────────

pub fn decode_minutes(n: i64) -> Result<u32> {
  u32::try_from(n).map_err(|_| Error::InvalidData(format!("minutes out of range: {n}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `roots` row, columns `id, text, meaning, description`
/// starting at `offset`.
pub struct RawRoot {
  pub id:          String,
  pub text:        String,
  pub meaning:     String,
  pub description: String,
}

impl RawRoot {
  pub const COLUMNS: &'static str = "id, text, meaning, description";

  pub fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(offset)?,
      text:        row.get(offset + 1)?,
      meaning:     row.get(offset + 2)?,
      description: row.get(offset + 3)?,
    })
  }

  pub fn into_root(self) -> Result<Root> {
    Ok(Root {
      id:          decode_uuid(&self.id)?,
      text:        self.text,
      meaning:     self.meaning,
      description: self.description,
    })
  }
}

/// Raw strings read from an `affixes` row.
pub struct RawAffix {
  pub id:      String,
  pub text:    String,
  pub kind:    String,
  pub meaning: String,
}

impl RawAffix {
  pub const COLUMNS: &'static str = "id, text, type, meaning";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:      row.get(0)?,
      text:    row.get(1)?,
      kind:    row.get(2)?,
      meaning: row.get(3)?,
    })
  }

  pub fn into_affix(self) -> Result<Affix> {
    Ok(Affix {
      id:      decode_uuid(&self.id)?,
      text:    self.text,
      kind:    decode_affix_type(&self.kind)?,
      meaning: self.meaning,
    })
  }
}

/// Raw strings read from a `words` row.
pub struct RawWord {
  pub id:            String,
  pub text:          String,
  pub meaning:       String,
  pub root:          String,
  pub prefix:        Option<String>,
  pub suffix:        Option<String>,
  pub pronunciation: String,
}

impl RawWord {
  pub const COLUMNS: &'static str = "id, text, meaning, root, prefix, suffix, pronunciation";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      text:          row.get(1)?,
      meaning:       row.get(2)?,
      root:          row.get(3)?,
      prefix:        row.get(4)?,
      suffix:        row.get(5)?,
      pronunciation: row.get(6)?,
    })
  }

  pub fn into_word(self) -> Result<Word> {
    Ok(Word {
      id:            decode_uuid(&self.id)?,
      text:          self.text,
      meaning:       self.meaning,
      root:          self.root,
      prefix:        self.prefix,
      suffix:        self.suffix,
      pronunciation: self.pronunciation,
    })
  }
}

/// Raw strings read from a `sentences` row.
pub struct RawSentence {
  pub id:          String,
  pub word_id:     String,
  pub text:        String,
  pub translation: String,
}

impl RawSentence {
  pub const COLUMNS: &'static str = "id, word_id, text, translation";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      word_id:     row.get(1)?,
      text:        row.get(2)?,
      translation: row.get(3)?,
    })
  }

  pub fn into_sentence(self) -> Result<ExampleSentence> {
    Ok(ExampleSentence {
      id:          decode_uuid(&self.id)?,
      text:        self.text,
      translation: self.translation,
      word_id:     decode_uuid(&self.word_id)?,
    })
  }
}

/// A `roots` row joined with the `root_relations` row that points at it.
pub struct RawRelatedRoot {
  pub root:          RawRoot,
  pub relation_type: String,
  pub description:   Option<String>,
}

impl RawRelatedRoot {
  pub fn into_related(self) -> Result<RelatedRoot> {
    Ok(RelatedRoot {
      root:          self.root.into_root()?,
      relation_type: self.relation_type,
      description:   self.description,
    })
  }
}
