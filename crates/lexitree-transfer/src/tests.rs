//! Coordinator tests against an in-memory SQLite store.

use lexitree_core::{
  model::{AffixType, Word},
  store::VocabularyStore,
};
use lexitree_store_sqlite::SqliteStore;

use crate::{
  Error, ImportReport, RestoreReport, ensure_populated, export_flat_file, export_json,
  import_file, import_str, restore, restore_json, seed_words_file,
};

const WORDS: &str = r#"import | 进口，输入 | port:词根:港口;im:前缀:向内 | ɪmˈpɔːrt | "They import goods." ~ "他们进口商品。"
portable | 便携的 | port:词根:携带;able:后缀:能够的 | ˈpɔːrtəbl | "A portable radio." ~ "一台便携式收音机。"
inspect | 检查 | spect:词根:看;in:前缀:向内 | ɪnˈspekt | "Inspect the car."
"#;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Word fields minus the generated identifier.
fn shape(w: &Word) -> (String, String, String, Option<String>, Option<String>, String) {
  (
    w.text.clone(),
    w.meaning.clone(),
    w.root.clone(),
    w.prefix.clone(),
    w.suffix.clone(),
    w.pronunciation.clone(),
  )
}

// ─── Flat-file import ────────────────────────────────────────────────────────

#[tokio::test]
async fn import_decomposes_every_line() {
  let s = store().await;
  let report = import_str(&s, WORDS).await;

  assert_eq!(report, ImportReport {
    lines:     3,
    parsed:    3,
    skipped:   0,
    persisted: 12,
    failed:    0,
  });

  let roots: Vec<_> = s.all_roots().await.unwrap().into_iter().map(|r| r.text).collect();
  assert_eq!(roots, ["port", "spect"]);
  // Later lines replace the meaning of an existing root.
  let port = s.root_by_text("port").await.unwrap().unwrap();
  assert_eq!(port.meaning, "携带");

  let prefixes: Vec<_> = s
    .affixes(Some(AffixType::Prefix))
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.text)
    .collect();
  assert_eq!(prefixes, ["im", "in"]);

  let port_words: Vec<_> = s
    .words_for_root("port")
    .await
    .unwrap()
    .into_iter()
    .map(|w| w.text)
    .collect();
  assert_eq!(port_words, ["import", "portable"]);

  assert!(s.random_example_for_root("port").await.unwrap().is_some());
  assert_eq!(s.stats().await.unwrap().sentences, 3);
}

#[tokio::test]
async fn reimport_duplicates_words_but_not_roots_or_affixes() {
  let s = store().await;
  import_str(&s, WORDS).await;
  import_str(&s, WORDS).await;

  let stats = s.stats().await.unwrap();
  assert_eq!(stats.words, 6);
  assert_eq!(stats.sentences, 6);
  assert_eq!(stats.roots, 2);
  assert_eq!(stats.affixes, 3);

  let imports: Vec<_> = s
    .all_words()
    .await
    .unwrap()
    .into_iter()
    .filter(|w| w.text == "import")
    .collect();
  assert_eq!(imports.len(), 2);
  assert_ne!(imports[0].id, imports[1].id);
}

#[tokio::test]
async fn malformed_lines_are_skipped() {
  let s = store().await;
  let content = "import|进口\n\n  \t\n\
                 export | 出口 | port:词根:搬运;ex:前缀:向外 | ˈekspɔːrt | \"Export it.\"\n\
                 a | b | c | d | e | f\n";
  let report = import_str(&s, content).await;

  // The whitespace-only line counts as a line and is skipped.
  assert_eq!(report.lines, 4);
  assert_eq!(report.parsed, 1);
  assert_eq!(report.skipped, 3);
  assert_eq!(report.failed, 0);

  let words: Vec<_> = s.all_words().await.unwrap().into_iter().map(|w| w.text).collect();
  assert_eq!(words, ["export"]);
}

#[tokio::test]
async fn missing_word_list_imports_nothing() {
  let s = store().await;
  let dir = tempfile::tempdir().unwrap();

  let report = import_file(&s, dir.path().join("words.txt")).await.unwrap();
  assert_eq!(report, ImportReport::default());
  assert_eq!(s.stats().await.unwrap().words, 0);
}

#[tokio::test]
async fn import_file_reads_from_disk() {
  let s = store().await;
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("words.txt");
  std::fs::write(&path, WORDS).unwrap();

  let report = import_file(&s, &path).await.unwrap();
  assert_eq!(report.parsed, 3);
  assert_eq!(s.stats().await.unwrap().words, 3);
}

// ─── Interchange document ────────────────────────────────────────────────────

#[tokio::test]
async fn export_reset_restore_reproduces_snapshot() {
  let s = store().await;
  import_str(&s, WORDS).await;
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("lexitree.json");

  let exported = export_json(&s, &path).await.unwrap();
  assert_eq!(exported.words.len(), 3);

  s.reset_schema().await.unwrap();
  let report = restore_json(&s, &path).await.unwrap();
  assert_eq!(report, RestoreReport { saved: 8, failed: 0 });

  assert_eq!(s.snapshot().await.unwrap(), exported);
  // Sentences are not carried by the document.
  assert_eq!(s.stats().await.unwrap().sentences, 0);
}

#[tokio::test]
async fn restoring_twice_rejects_duplicate_word_ids() {
  let s = store().await;
  import_str(&s, WORDS).await;
  let doc = s.snapshot().await.unwrap();

  let report = restore(&s, &doc).await;
  assert_eq!(report, RestoreReport { saved: 5, failed: 3 });
  assert_eq!(s.stats().await.unwrap().words, 3);
}

#[tokio::test]
async fn bad_document_is_invalid_data() {
  let s = store().await;
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("broken.json");
  std::fs::write(&path, r#"{"words": [], "roots": "#).unwrap();

  let err = restore_json(&s, &path).await.unwrap_err();
  assert!(matches!(err, Error::InvalidData(_)));

  let err = restore_json(&s, dir.path().join("absent.json"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::FileOperationFailed { .. }));
}

// ─── Flat-file export ────────────────────────────────────────────────────────

#[tokio::test]
async fn dumped_word_list_reimports_to_same_words() {
  let s = store().await;
  import_str(&s, WORDS).await;
  let before: Vec<_> = s.all_words().await.unwrap().iter().map(shape).collect();

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dump.txt");
  assert_eq!(export_flat_file(&s, &path).await.unwrap(), 3);

  let dumped = std::fs::read_to_string(&path).unwrap();
  let lines: Vec<_> = dumped.lines().collect();
  assert_eq!(
    lines[0],
    r#"import | 进口，输入 | port:词根:携带;im:前缀:向内 | ɪmˈpɔːrt | "They import goods." ~ "他们进口商品。""#
  );
  assert_eq!(
    lines[1],
    r#"inspect | 检查 | spect:词根:看;in:前缀:向内 | ɪnˈspekt | "Inspect the car.""#
  );

  s.reset_schema().await.unwrap();
  let report = import_file(&s, &path).await.unwrap();
  assert_eq!(report.skipped, 0);

  let after: Vec<_> = s.all_words().await.unwrap().iter().map(shape).collect();
  assert_eq!(after, before);
}

// ─── Bootstrap ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_copies_only_once() {
  let dir = tempfile::tempdir().unwrap();
  let source = dir.path().join("bundled.txt");
  let dest = dir.path().join("home").join(".lexitree").join("words.txt");
  std::fs::write(&source, WORDS).unwrap();

  assert!(seed_words_file(&source, &dest).await.unwrap());
  assert_eq!(std::fs::read_to_string(&dest).unwrap(), WORDS);

  std::fs::write(&dest, "edited").unwrap();
  assert!(!seed_words_file(&source, &dest).await.unwrap());
  assert_eq!(std::fs::read_to_string(&dest).unwrap(), "edited");
}

#[tokio::test]
async fn seed_from_missing_source_fails() {
  let dir = tempfile::tempdir().unwrap();
  let err = seed_words_file(dir.path().join("nope.txt"), dir.path().join("words.txt"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::FileOperationFailed { .. }));
}

#[tokio::test]
async fn ensure_populated_imports_into_empty_store_only() {
  let s = store().await;
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("words.txt");
  std::fs::write(&path, WORDS).unwrap();

  let first = ensure_populated(&s, &path).await.unwrap();
  assert_eq!(first.map(|r| r.parsed), Some(3));

  let second = ensure_populated(&s, &path).await.unwrap();
  assert_eq!(second, None);
  assert_eq!(s.stats().await.unwrap().words, 3);
}
