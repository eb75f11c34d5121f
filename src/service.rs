// Moderation service — the caller-facing operation set over shared state.
//
// The service owns the dictionary and flag config behind RwLocks and wires
// the injected classifier and stores into the pipeline. Every read takes a
// consistent snapshot; every mutation applies in memory first and then
// persists. A failed persist does NOT roll the mutation back: the caller
// gets a degraded `Outcome::Unsaved` and the process keeps serving the new
// state.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::classifier::ContentClassifier;
use crate::flags::{FlagConfig, FlagConfigPatch};
use crate::pipeline::{self, ModerationRequest, ModerationResult, RequestError};
use crate::redaction::word_mask;
use crate::store::{FlagConfigStore, WordListStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("the word \"{0}\" is not in the forbidden-word list")]
    NotFound(String),
}

impl From<RequestError> for ServiceError {
    fn from(e: RequestError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

/// How a successful mutation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Applied in memory and persisted.
    Saved,
    /// Applied in memory but the persist failed; detail says why.
    Unsaved(String),
}

impl Outcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved)
    }
}

pub struct ModerationService {
    classifier: Arc<dyn ContentClassifier>,
    word_store: Arc<dyn WordListStore>,
    flag_store: Arc<dyn FlagConfigStore>,
    dictionary: RwLock<BTreeMap<String, String>>,
    flag_config: RwLock<FlagConfig>,
}

impl ModerationService {
    /// Build the service: load the word list (seeding it if absent) and the
    /// flag config (persisting defaults on first run).
    pub async fn new(
        classifier: Arc<dyn ContentClassifier>,
        word_store: Arc<dyn WordListStore>,
        flag_store: Arc<dyn FlagConfigStore>,
    ) -> anyhow::Result<Self> {
        let words = word_store.load().await?;
        let dictionary: BTreeMap<String, String> = words
            .into_iter()
            .map(|w| {
                let mask = word_mask(&w);
                (w, mask)
            })
            .collect();

        let flag_config = match flag_store.load().await? {
            Some(config) => config,
            None => {
                let defaults = FlagConfig::default();
                flag_store.persist(&defaults).await?;
                info!("Seeded default flag configuration");
                defaults
            }
        };

        info!(words = dictionary.len(), "Moderation service ready");

        Ok(Self {
            classifier,
            word_store,
            flag_store,
            dictionary: RwLock::new(dictionary),
            flag_config: RwLock::new(flag_config),
        })
    }

    /// Moderate one review. Rejects empty text; clamps the threshold.
    pub async fn moderate(
        &self,
        text: &str,
        threshold: Option<f64>,
    ) -> Result<ModerationResult, ServiceError> {
        let request = ModerationRequest::new(text, threshold)?;

        // Snapshots keep the pipeline consistent even if a concurrent
        // mutation lands mid-request.
        let dictionary = self.dictionary.read().await.clone();
        let config = self.flag_config.read().await.clone();

        Ok(pipeline::review::run(self.classifier.as_ref(), &dictionary, &config, &request).await)
    }

    /// Add a word to the forbidden-word list. Returns the stored form and
    /// its mask alongside the persistence outcome.
    pub async fn add_word(&self, word: &str) -> Result<(String, String, Outcome), ServiceError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(ServiceError::Validation(
                "the \"word\" field is required and must not be empty".to_string(),
            ));
        }

        let mask = word_mask(&word);
        let words = {
            let mut dictionary = self.dictionary.write().await;
            dictionary.insert(word.clone(), mask.clone());
            dictionary.keys().cloned().collect::<Vec<_>>()
        };

        let outcome = self.persist_words(&words).await;
        info!(word = %word, saved = outcome.is_saved(), "Added forbidden word");
        Ok((word, mask, outcome))
    }

    /// Remove a word from the list. NotFound leaves the state untouched.
    pub async fn remove_word(&self, word: &str) -> Result<Outcome, ServiceError> {
        let word = word.trim().to_lowercase();
        let words = {
            let mut dictionary = self.dictionary.write().await;
            if dictionary.remove(&word).is_none() {
                return Err(ServiceError::NotFound(word));
            }
            dictionary.keys().cloned().collect::<Vec<_>>()
        };

        let outcome = self.persist_words(&words).await;
        info!(word = %word, saved = outcome.is_saved(), "Removed forbidden word");
        Ok(outcome)
    }

    /// Current word -> mask mapping.
    pub async fn list_words(&self) -> BTreeMap<String, String> {
        self.dictionary.read().await.clone()
    }

    /// Current flag configuration.
    pub async fn flag_config(&self) -> FlagConfig {
        self.flag_config.read().await.clone()
    }

    /// Merge a partial flag-config update and persist the result.
    pub async fn update_flag_config(
        &self,
        patch: &FlagConfigPatch,
    ) -> Result<Outcome, ServiceError> {
        if let Some(threshold) = patch.mistral_score_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ServiceError::Validation(format!(
                    "mistral_score_threshold must be between 0 and 1, got {threshold}"
                )));
            }
        }

        let updated = {
            let mut config = self.flag_config.write().await;
            config.apply(patch);
            config.clone()
        };

        let outcome = match self.flag_store.persist(&updated).await {
            Ok(()) => Outcome::Saved,
            Err(e) => {
                error!(error = %e, "Flag config updated in memory but not persisted");
                Outcome::Unsaved(e.to_string())
            }
        };
        info!(saved = outcome.is_saved(), "Updated flag configuration");
        Ok(outcome)
    }

    async fn persist_words(&self, words: &[String]) -> Outcome {
        match self.word_store.persist(words).await {
            Ok(()) => Outcome::Saved,
            Err(e) => {
                error!(error = %e, "Word list updated in memory but not persisted");
                Outcome::Unsaved(e.to_string())
            }
        }
    }
}
