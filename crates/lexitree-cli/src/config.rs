//! Host configuration, read from an optional TOML file layered with
//! `LEXITREE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// SQLite database file.
  #[serde(default = "default_store_path")]
  pub store_path:      PathBuf,
  /// Working copy of the flat word list.
  #[serde(default = "default_words_path")]
  pub words_path:      PathBuf,
  /// Bundled word list copied to `words_path` on first run.
  #[serde(default)]
  pub seed_words_path: Option<PathBuf>,
  /// Import `words_path` before reading from an empty store.
  #[serde(default = "default_auto_import")]
  pub auto_import:     bool,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.lexitree/lexitree.db") }

fn default_words_path() -> PathBuf { PathBuf::from("~/.lexitree/words.txt") }

fn default_auto_import() -> bool { true }

impl AppConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = ::config::Config::builder()
      .add_source(::config::File::from(path).required(false))
      .add_source(::config::Environment::with_prefix("LEXITREE"))
      .build()
      .context("failed to read config file")?;

    let cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;

    Ok(Self {
      store_path:      expand_tilde(&cfg.store_path),
      words_path:      expand_tilde(&cfg.words_path),
      seed_words_path: cfg.seed_words_path.as_deref().map(expand_tilde),
      auto_import:     cfg.auto_import,
    })
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexitree.toml");
    std::fs::write(
      &path,
      "store_path = \"/var/lib/lexitree/db.sqlite\"\n\
       seed_words_path = \"/usr/share/lexitree/words.txt\"\n\
       auto_import = false\n",
    )
    .unwrap();

    let cfg = AppConfig::load(&path).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/lexitree/db.sqlite"));
    assert_eq!(
      cfg.seed_words_path,
      Some(PathBuf::from("/usr/share/lexitree/words.txt"))
    );
    assert!(!cfg.auto_import);
    assert!(cfg.words_path.ends_with(".lexitree/words.txt"));
  }

  #[test]
  fn missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert!(cfg.store_path.ends_with(".lexitree/lexitree.db"));
    assert_eq!(cfg.seed_words_path, None);
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/a/b")), PathBuf::from(home).join("a/b"));
    assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
    assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
  }
}
