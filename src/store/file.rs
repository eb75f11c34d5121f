// File-backed stores.
//
// The word list is a plain text file, one lowercase word per line; blank
// lines and `#` comments are ignored so operators can annotate it by hand.
// The flag config is a pretty-printed JSON file. Both rewrite the whole
// file on persist; the records are tiny and partial writes aren't worth
// the complexity.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::flags::FlagConfig;

use super::traits::{FlagConfigStore, StoreError, WordListStore};
use super::DEFAULT_FORBIDDEN_WORDS;

async fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Flat-file word list store.
pub struct FileWordListStore {
    path: PathBuf,
}

impl FileWordListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WordListStore for FileWordListStore {
    async fn load(&self) -> Result<Vec<String>, StoreError> {
        if !self.path.exists() {
            // First run: seed the default list so the file is visible and
            // editable right away.
            let defaults: Vec<String> = DEFAULT_FORBIDDEN_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect();
            self.persist(&defaults).await?;
            info!(path = %self.path.display(), "Seeded default forbidden-word list");
            return Ok(defaults);
        }

        let content = fs::read_to_string(&self.path).await?;
        let words = content
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        Ok(words)
    }

    async fn persist(&self, words: &[String]) -> Result<(), StoreError> {
        ensure_parent(&self.path).await?;
        let mut content = String::new();
        for word in words {
            content.push_str(word);
            content.push('\n');
        }
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// JSON flag-config store.
pub struct FileFlagConfigStore {
    path: PathBuf,
}

impl FileFlagConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FlagConfigStore for FileFlagConfigStore {
    async fn load(&self) -> Result<Option<FlagConfig>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        let config = serde_json::from_str(&content)?;
        Ok(Some(config))
    }

    async fn persist(&self, config: &FlagConfig) -> Result<(), StoreError> {
        ensure_parent(&self.path).await?;
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}
