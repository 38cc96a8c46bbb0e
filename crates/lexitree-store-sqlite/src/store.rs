//! The SQLite implementation of [`VocabularyStore`].

use std::path::Path;

use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension as _};
use uuid::Uuid;

use lexitree_core::{
  model::{
    Affix, AffixType, ExampleSentence, LearningRecord, RelatedRoot, Root,
    RootRelation, Word,
  },
  store::{Snapshot, StoreStats, VocabularyStore},
};

use crate::{
  Error, Result,
  encode::{
    RawAffix, RawRelatedRoot, RawRoot, RawSentence, RawWord, decode_minutes,
    encode_affix_type, encode_date, encode_uuid,
  },
  schema,
};

// ─── Shared queries ──────────────────────────────────────────────────────────
//
// Plain functions over a borrowed connection so that `snapshot` can run them
// back to back inside a single `call`.

fn query_roots(conn: &Connection) -> rusqlite::Result<Vec<RawRoot>> {
  let sql = format!("SELECT {} FROM roots ORDER BY text", RawRoot::COLUMNS);
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map([], |row| RawRoot::from_row(row, 0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn query_affixes(conn: &Connection, kind: Option<&str>) -> rusqlite::Result<Vec<RawAffix>> {
  if let Some(k) = kind {
    let sql = format!(
      "SELECT {} FROM affixes WHERE type = ?1 ORDER BY text",
      RawAffix::COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
      .query_map(rusqlite::params![k], RawAffix::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  } else {
    let sql = format!("SELECT {} FROM affixes ORDER BY text", RawAffix::COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
      .query_map([], RawAffix::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}

fn query_words(conn: &Connection, root: Option<&str>) -> rusqlite::Result<Vec<RawWord>> {
  if let Some(r) = root {
    let sql = format!(
      "SELECT {} FROM words WHERE root = ?1 ORDER BY text",
      RawWord::COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
      .query_map(rusqlite::params![r], RawWord::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  } else {
    let sql = format!("SELECT {} FROM words ORDER BY text", RawWord::COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
      .query_map([], RawWord::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A LexiTree vocabulary store backed by a single SQLite file.
///
/// Cloning is cheap. The inner connection is reference-counted and every
/// clone talks to the same connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and make sure the schema exists.
  ///
  /// Idempotent: opening a populated store leaves its data untouched. Only a
  /// failure to open the file is an error; schema statements that fail are
  /// logged and left for later calls to trip over.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening store");
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(Error::ConnectionFailed)?;
    let store = Self { conn };
    store.apply_schema(false).await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(Error::ConnectionFailed)?;
    let store = Self { conn };
    store.apply_schema(false).await?;
    Ok(store)
  }

  /// Drop every table and recreate the schema. All data is lost.
  pub async fn reset_schema(&self) -> Result<()> { self.apply_schema(true).await }

  async fn apply_schema(&self, reset: bool) -> Result<()> {
    let failed = self
      .conn
      .call(move |conn| Ok(schema::apply(conn, reset)))
      .await?;
    if failed > 0 {
      tracing::error!(failed, "schema is incomplete; affected calls will fail");
    }
    Ok(())
  }

  /// Write a consistent copy of the database to `dest` with `VACUUM INTO`.
  ///
  /// Runs as one unit of work on the connection thread, so no other call
  /// interleaves with it and the handle stays open. Fails if `dest` exists.
  pub async fn backup_to(&self, dest: impl AsRef<Path>) -> Result<()> {
    let dest = dest.as_ref();
    let dest_str = dest
      .to_str()
      .ok_or_else(|| Error::InvalidData(format!("non UTF-8 path: {}", dest.display())))?
      .to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute("VACUUM INTO ?1", rusqlite::params![dest_str])?;
        Ok(())
      })
      .await?;

    tracing::info!(dest = %dest.display(), "store backed up");
    Ok(())
  }

  /// Close the connection. Later calls on any clone fail with
  /// [`Error::ConnectionFailed`].
  pub async fn close(&self) -> Result<()> {
    self.conn.clone().close().await?;
    Ok(())
  }
}

// ─── VocabularyStore impl ────────────────────────────────────────────────────

impl VocabularyStore for SqliteStore {
  type Error = Error;

  async fn stats(&self) -> Result<StoreStats> {
    let (words, roots, affixes, sentences): (i64, i64, i64, i64) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT
             (SELECT COUNT(*) FROM words),
             (SELECT COUNT(*) FROM roots),
             (SELECT COUNT(*) FROM affixes),
             (SELECT COUNT(*) FROM sentences)",
          [],
          |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )?)
      })
      .await?;

    Ok(StoreStats {
      words:     words as u64,
      roots:     roots as u64,
      affixes:   affixes as u64,
      sentences: sentences as u64,
    })
  }

  // ── Roots ─────────────────────────────────────────────────────────────────

  async fn save_root(&self, root: &Root) -> Result<()> {
    let id_str      = encode_uuid(root.id);
    let text        = root.text.clone();
    let meaning     = root.meaning.clone();
    let description = root.description.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO roots (id, text, meaning, description)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(text) DO UPDATE SET
             meaning     = excluded.meaning,
             description = excluded.description
           ON CONFLICT(id) DO UPDATE SET
             text        = excluded.text,
             meaning     = excluded.meaning,
             description = excluded.description",
          rusqlite::params![id_str, text, meaning, description],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn all_roots(&self) -> Result<Vec<Root>> {
    let raws = self.conn.call(|conn| Ok(query_roots(conn)?)).await?;
    raws.into_iter().map(RawRoot::into_root).collect()
  }

  async fn root_by_text(&self, text: &str) -> Result<Option<Root>> {
    let text = text.to_owned();

    let raw: Option<RawRoot> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM roots WHERE text = ?1 LIMIT 1",
          RawRoot::COLUMNS
        );
        Ok(conn
          .query_row(&sql, rusqlite::params![text], |row| RawRoot::from_row(row, 0))
          .optional()?)
      })
      .await?;

    raw.map(RawRoot::into_root).transpose()
  }

  // ── Affixes ───────────────────────────────────────────────────────────────

  async fn save_affix(&self, affix: &Affix) -> Result<()> {
    let id_str   = encode_uuid(affix.id);
    let text     = affix.text.clone();
    let kind_str = encode_affix_type(affix.kind);
    let meaning  = affix.meaning.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO affixes (id, text, type, meaning)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(text, type) DO UPDATE SET
             meaning = excluded.meaning
           ON CONFLICT(id) DO UPDATE SET
             text    = excluded.text,
             type    = excluded.type,
             meaning = excluded.meaning",
          rusqlite::params![id_str, text, kind_str, meaning],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn affixes(&self, kind: Option<AffixType>) -> Result<Vec<Affix>> {
    let kind_str = kind.map(encode_affix_type);

    let raws = self
      .conn
      .call(move |conn| Ok(query_affixes(conn, kind_str)?))
      .await?;

    raws.into_iter().map(RawAffix::into_affix).collect()
  }

  // ── Words ─────────────────────────────────────────────────────────────────

  async fn save_word(&self, word: &Word) -> Result<()> {
    let id_str        = encode_uuid(word.id);
    let text          = word.text.clone();
    let meaning       = word.meaning.clone();
    let root          = word.root.clone();
    let prefix        = word.prefix.clone();
    let suffix        = word.suffix.clone();
    let pronunciation = word.pronunciation.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO words (id, text, meaning, root, prefix, suffix, pronunciation)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, text, meaning, root, prefix, suffix, pronunciation],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn all_words(&self) -> Result<Vec<Word>> {
    let raws = self.conn.call(|conn| Ok(query_words(conn, None)?)).await?;
    raws.into_iter().map(RawWord::into_word).collect()
  }

  async fn words_for_root(&self, root_text: &str) -> Result<Vec<Word>> {
    let root_text = root_text.to_owned();

    let raws = self
      .conn
      .call(move |conn| Ok(query_words(conn, Some(&root_text))?))
      .await?;

    raws.into_iter().map(RawWord::into_word).collect()
  }

  // ── Example sentences ─────────────────────────────────────────────────────

  async fn save_sentence(&self, sentence: &ExampleSentence) -> Result<()> {
    let id_str      = encode_uuid(sentence.id);
    let word_id_str = encode_uuid(sentence.word_id);
    let text        = sentence.text.clone();
    let translation = sentence.translation.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sentences (id, word_id, text, translation)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, word_id_str, text, translation],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn sentences_for_word(&self, word_id: Uuid) -> Result<Vec<ExampleSentence>> {
    let word_id_str = encode_uuid(word_id);

    let raws: Vec<RawSentence> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM sentences WHERE word_id = ?1 ORDER BY rowid",
          RawSentence::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![word_id_str], RawSentence::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSentence::into_sentence).collect()
  }

  async fn random_example_for_root(&self, root_text: &str) -> Result<Option<ExampleSentence>> {
    let root_text = root_text.to_owned();

    let raw: Option<RawSentence> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT s.id, s.word_id, s.text, s.translation
             FROM sentences s
             INNER JOIN words w ON s.word_id = w.id
             WHERE w.root = ?1
             ORDER BY RANDOM()
             LIMIT 1",
            rusqlite::params![root_text],
            RawSentence::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSentence::into_sentence).transpose()
  }

  // ── Root relations ────────────────────────────────────────────────────────

  async fn save_relation(&self, relation: &RootRelation) -> Result<()> {
    let id_str        = encode_uuid(relation.id);
    let root1_str     = encode_uuid(relation.root1_id);
    let root2_str     = encode_uuid(relation.root2_id);
    let relation_type = relation.relation_type.clone();
    let description   = relation.description.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO root_relations (id, root1_id, root2_id, relation_type, description)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, root1_str, root2_str, relation_type, description],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn relations_for(&self, root: &Root) -> Result<Vec<RelatedRoot>> {
    // Resolved through the root's text: a caller may hold a `Root` whose
    // identifier lost a natural-key upsert to an earlier row.
    let root_text = root.text.clone();

    let raws: Vec<RawRelatedRoot> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT r2.id, r2.text, r2.meaning, r2.description,
                  rr.relation_type, rr.description
           FROM root_relations rr
           INNER JOIN roots r1 ON rr.root1_id = r1.id
           INNER JOIN roots r2 ON rr.root2_id = r2.id
           WHERE r1.text = ?1
           ORDER BY r2.text",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![root_text], |row| {
            Ok(RawRelatedRoot {
              root:          RawRoot::from_row(row, 0)?,
              relation_type: row.get(4)?,
              description:   row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRelatedRoot::into_related).collect()
  }

  // ── Learning records ──────────────────────────────────────────────────────

  async fn record_learning_minutes(&self, minutes: u32) -> Result<LearningRecord> {
    self.record_learning_minutes_on(Local::now().date_naive(), minutes).await
  }

  async fn record_learning_minutes_on(
    &self,
    date:    NaiveDate,
    minutes: u32,
  ) -> Result<LearningRecord> {
    let record = LearningRecord { id: Uuid::new_v4(), date, minutes };

    let id_str   = encode_uuid(record.id);
    let date_str = encode_date(date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO learning_records (id, date, minutes) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, date_str, minutes],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn today_learning_minutes(&self) -> Result<u32> {
    self.learning_minutes_on(Local::now().date_naive()).await
  }

  async fn learning_minutes_on(&self, date: NaiveDate) -> Result<u32> {
    let date_str = encode_date(date);

    let total: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(minutes), 0) FROM learning_records WHERE date = ?1",
          rusqlite::params![date_str],
          |r| r.get(0),
        )?)
      })
      .await?;

    decode_minutes(total)
  }

  // ── Export ────────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    let (words, roots, affixes) = self
      .conn
      .call(|conn| {
        let words = query_words(conn, None)?;
        let roots = query_roots(conn)?;
        let affixes = query_affixes(conn, None)?;
        Ok((words, roots, affixes))
      })
      .await?;

    Ok(Snapshot {
      words:   words.into_iter().map(RawWord::into_word).collect::<Result<_>>()?,
      roots:   roots.into_iter().map(RawRoot::into_root).collect::<Result<_>>()?,
      affixes: affixes.into_iter().map(RawAffix::into_affix).collect::<Result<_>>()?,
    })
  }
}
