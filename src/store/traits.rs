// Store traits — async interfaces over the two persisted records.
//
// Persist failures are recoverable by design: the service keeps the
// in-memory mutation and reports a degraded outcome instead of rolling back.

use async_trait::async_trait;
use thiserror::Error;

use crate::flags::FlagConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Load/persist the forbidden-word list as a flat list of lowercase words.
#[async_trait]
pub trait WordListStore: Send + Sync {
    /// Load every word. Implementations seed a default list when the
    /// underlying record does not exist yet.
    async fn load(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the persisted list with `words`.
    async fn persist(&self, words: &[String]) -> Result<(), StoreError>;
}

/// Load/persist the flag configuration record.
#[async_trait]
pub trait FlagConfigStore: Send + Sync {
    /// Load the stored config, or None when none has been persisted yet.
    async fn load(&self) -> Result<Option<FlagConfig>, StoreError>;

    /// Replace the persisted config.
    async fn persist(&self, config: &FlagConfig) -> Result<(), StoreError>;
}
