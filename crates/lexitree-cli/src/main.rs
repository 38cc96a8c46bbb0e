//! `lexitree`: command-line host for the LexiTree vocabulary store.
//!
//! # Usage
//!
//! ```text
//! lexitree init
//! lexitree import [FILE]
//! lexitree export backup.json && lexitree reset && lexitree restore backup.json
//! lexitree example port
//! lexitree study 15
//! ```
//!
//! Paths come from `lexitree.toml` (or `--config`) and `LEXITREE_*`
//! environment variables; see [`AppConfig`].

mod config;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use lexitree_core::{
  model::{AffixType, RootRelation},
  store::VocabularyStore,
};
use lexitree_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "lexitree", version, about = "LexiTree vocabulary store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lexitree.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the store, seed the word list and import it if the store is
  /// empty.
  Init,
  /// Import a flat word list (defaults to the configured one).
  Import { file: Option<PathBuf> },
  /// Write words, roots and affixes to a JSON interchange document.
  Export { file: PathBuf },
  /// Apply a JSON interchange document to the store.
  Restore { file: PathBuf },
  /// Write the store back out as a flat word list.
  Dump { file: PathBuf },
  /// Copy the whole database file, sentences and relations included.
  Backup { file: PathBuf },
  /// Drop and recreate every table.
  Reset,
  /// Row counts and today's study time.
  Stats,
  /// List roots.
  Roots,
  /// List affixes.
  Affixes {
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
  },
  /// List words, optionally only those built on one root.
  Words {
    #[arg(long)]
    root: Option<String>,
  },
  /// Record a relation between two roots.
  Relate {
    from:          String,
    to:            String,
    relation_type: String,
    #[arg(long)]
    description:   Option<String>,
  },
  /// Roots related to a root.
  Relations { root: String },
  /// A random example sentence for a root.
  Example { root: String },
  /// Record study minutes for today.
  Study { minutes: u32 },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
  Prefix,
  Suffix,
}

impl From<KindArg> for AffixType {
  fn from(k: KindArg) -> Self {
    match k {
      KindArg::Prefix => AffixType::Prefix,
      KindArg::Suffix => AffixType::Suffix,
    }
  }
}

impl Command {
  fn reads_vocabulary(&self) -> bool {
    matches!(
      self,
      Command::Stats
        | Command::Roots
        | Command::Affixes { .. }
        | Command::Words { .. }
        | Command::Relations { .. }
        | Command::Example { .. }
    )
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let Some(store) = open_store(&cfg.store_path).await else {
    println!("no data available");
    return Ok(());
  };

  if let Some(seed) = &cfg.seed_words_path
    && let Err(e) = lexitree_transfer::seed_words_file(seed, &cfg.words_path).await
  {
    tracing::warn!(error = %e, "failed to seed word list");
  }

  let wants_import =
    matches!(cli.command, Command::Init) || (cfg.auto_import && cli.command.reads_vocabulary());
  if wants_import
    && let Some(report) = lexitree_transfer::ensure_populated(&store, &cfg.words_path).await?
  {
    println!(
      "imported {} of {} lines ({} rows, {} failed)",
      report.parsed, report.lines, report.persisted, report.failed
    );
  }

  let outcome = run(&store, &cfg, cli.command).await;
  store.close().await.context("failed to close store")?;
  outcome
}

/// Open the store, creating its directory as needed. Failure is logged and
/// reported as `None`.
async fn open_store(path: &Path) -> Option<SqliteStore> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
    && let Err(e) = std::fs::create_dir_all(parent)
  {
    tracing::error!(?parent, error = %e, "failed to create store directory");
    return None;
  }

  match SqliteStore::open(path).await {
    Ok(store) => Some(store),
    Err(e) => {
      tracing::error!(?path, error = %e, "failed to open store");
      None
    }
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run(store: &SqliteStore, cfg: &AppConfig, command: Command) -> anyhow::Result<()> {
  match command {
    Command::Init => {
      let stats = store.stats().await?;
      println!("store ready at {} ({} words)", cfg.store_path.display(), stats.words);
    }

    Command::Import { file } => {
      let path = file.unwrap_or_else(|| cfg.words_path.clone());
      let report = lexitree_transfer::import_file(store, &path)
        .await
        .with_context(|| format!("failed to import {path:?}"))?;
      println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Command::Export { file } => {
      let doc = lexitree_transfer::export_json(store, &file)
        .await
        .with_context(|| format!("failed to export to {file:?}"))?;
      println!(
        "exported {} words, {} roots, {} affixes",
        doc.words.len(),
        doc.roots.len(),
        doc.affixes.len()
      );
    }

    Command::Restore { file } => {
      let report = lexitree_transfer::restore_json(store, &file)
        .await
        .with_context(|| format!("failed to restore {file:?}"))?;
      println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Command::Dump { file } => {
      let n = lexitree_transfer::export_flat_file(store, &file)
        .await
        .with_context(|| format!("failed to write {file:?}"))?;
      println!("wrote {n} words");
    }

    Command::Backup { file } => {
      store
        .backup_to(&file)
        .await
        .with_context(|| format!("failed to back up to {file:?}"))?;
      println!("backed up to {}", file.display());
    }

    Command::Reset => {
      store.reset_schema().await.context("failed to reset store")?;
      println!("store cleared");
    }

    Command::Stats => {
      let stats = store.stats().await?;
      let minutes = store.today_learning_minutes().await?;
      println!("words:     {}", stats.words);
      println!("roots:     {}", stats.roots);
      println!("affixes:   {}", stats.affixes);
      println!("sentences: {}", stats.sentences);
      println!("today:     {minutes} min");
    }

    Command::Roots => {
      for root in store.all_roots().await? {
        println!("{:<12} {}", root.text, root.meaning);
      }
    }

    Command::Affixes { kind } => {
      for affix in store.affixes(kind.map(Into::into)).await? {
        println!("{:<8} {:<12} {}", affix.kind.as_str(), affix.text, affix.meaning);
      }
    }

    Command::Words { root } => {
      let words = match root {
        Some(root) => store.words_for_root(&root).await?,
        None => store.all_words().await?,
      };
      for word in words {
        println!("{:<16} {:<16} {}", word.text, word.pronunciation, word.meaning);
      }
    }

    Command::Relate { from, to, relation_type, description } => {
      let (Some(a), Some(b)) = (store.root_by_text(&from).await?, store.root_by_text(&to).await?)
      else {
        anyhow::bail!("both roots must exist: {from:?}, {to:?}");
      };
      store
        .save_relation(&RootRelation {
          id: Uuid::new_v4(),
          root1_id: a.id,
          root2_id: b.id,
          relation_type,
          description,
        })
        .await?;
      println!("related {from} -> {to}");
    }

    Command::Relations { root } => {
      let Some(root) = store.root_by_text(&root).await? else {
        println!("no such root: {root}");
        return Ok(());
      };
      for related in store.relations_for(&root).await? {
        println!(
          "{:<12} {:<12} {}",
          related.root.text,
          related.relation_type,
          related.description.unwrap_or_default()
        );
      }
    }

    Command::Example { root } => match store.random_example_for_root(&root).await? {
      Some(s) if s.translation.is_empty() => println!("{}", s.text),
      Some(s) => println!("{}\n{}", s.text, s.translation),
      None => println!("no example for {root}"),
    },

    Command::Study { minutes } => {
      store.record_learning_minutes(minutes).await?;
      let total = store.today_learning_minutes().await?;
      println!("recorded {minutes} min; {total} min today");
    }
  }

  Ok(())
}
