//! Schema manager for the LexiTree SQLite store.
//!
//! Each table is created by its own statement so one failure does not stop
//! the rest. Failures are logged and counted, never returned: reads and
//! writes against a missing table fail individually later on.
//!
//! Foreign keys are declared for documentation only. `PRAGMA foreign_keys`
//! is switched off explicitly, since bundled SQLite builds may enable it by
//! default. `words.root` refers to `roots.text`, not to an identifier.

use rusqlite::Connection;

/// Connection-level settings applied before the tables, one at a time.
pub const PRAGMAS: &[&str] = &["PRAGMA foreign_keys = OFF;", "PRAGMA journal_mode = WAL;"];

/// Drop every table, children first.
pub const DROP_ALL: &str = "
DROP TABLE IF EXISTS sentences;
DROP TABLE IF EXISTS root_relations;
DROP TABLE IF EXISTS learning_records;
DROP TABLE IF EXISTS words;
DROP TABLE IF EXISTS roots;
DROP TABLE IF EXISTS affixes;
";

/// `(table, DDL)` pairs; idempotent thanks to `IF NOT EXISTS`.
pub const TABLES: &[(&str, &str)] = &[
  (
    "roots",
    "CREATE TABLE IF NOT EXISTS roots (
         id          TEXT PRIMARY KEY,
         text        TEXT NOT NULL UNIQUE,
         meaning     TEXT NOT NULL,
         description TEXT NOT NULL,
         created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
     );",
  ),
  (
    "words",
    "CREATE TABLE IF NOT EXISTS words (
         id            TEXT PRIMARY KEY,
         text          TEXT NOT NULL,
         meaning       TEXT NOT NULL,
         root          TEXT NOT NULL,   -- roots.text, '' when absent
         prefix        TEXT,
         suffix        TEXT,
         pronunciation TEXT NOT NULL,
         created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
     );
     CREATE INDEX IF NOT EXISTS words_root_idx ON words(root);",
  ),
  (
    "affixes",
    "CREATE TABLE IF NOT EXISTS affixes (
         id         TEXT PRIMARY KEY,
         text       TEXT NOT NULL,
         type       TEXT NOT NULL,      -- 'prefix' | 'suffix'
         meaning    TEXT NOT NULL,
         created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
         UNIQUE (text, type)
     );",
  ),
  (
    "sentences",
    "CREATE TABLE IF NOT EXISTS sentences (
         id          TEXT PRIMARY KEY,
         word_id     TEXT NOT NULL REFERENCES words(id),
         text        TEXT NOT NULL,
         translation TEXT NOT NULL,
         created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
     );
     CREATE INDEX IF NOT EXISTS sentences_word_idx ON sentences(word_id);",
  ),
  (
    "root_relations",
    "CREATE TABLE IF NOT EXISTS root_relations (
         id            TEXT PRIMARY KEY,
         root1_id      TEXT NOT NULL REFERENCES roots(id),
         root2_id      TEXT NOT NULL REFERENCES roots(id),
         relation_type TEXT NOT NULL,
         description   TEXT,
         created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
     );",
  ),
  (
    "learning_records",
    "CREATE TABLE IF NOT EXISTS learning_records (
         id         TEXT PRIMARY KEY,
         date       TEXT NOT NULL,      -- local calendar date, YYYY-MM-DD
         minutes    INTEGER NOT NULL,
         created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
     );
     CREATE INDEX IF NOT EXISTS learning_records_date_idx ON learning_records(date);",
  ),
];

/// Ensure every table exists, optionally dropping all of them first.
///
/// Returns the number of statements that failed.
pub fn apply(conn: &Connection, reset: bool) -> usize {
  let mut failed = 0;

  for pragma in PRAGMAS {
    if let Err(e) = conn.execute_batch(pragma) {
      tracing::warn!(pragma, error = %e, "failed to apply connection pragma");
    }
  }

  if reset {
    match conn.execute_batch(DROP_ALL) {
      Ok(()) => tracing::info!("dropped all tables"),
      Err(e) => {
        tracing::error!(error = %e, "failed to drop tables");
        failed += 1;
      }
    }
  }

  for (table, ddl) in TABLES {
    match conn.execute_batch(ddl) {
      Ok(()) => tracing::debug!(table, "table ready"),
      Err(e) => {
        tracing::error!(table, error = %e, "failed to create table");
        failed += 1;
      }
    }
  }

  failed
}
