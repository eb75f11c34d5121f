// Classifier trait — the swap-ready abstraction.
//
// The Mistral moderation API is the default provider. Anything that can
// turn a text into per-category scores fits behind this trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a classification provider.
///
/// These never escape the pipeline: the orchestrator downgrades them to a
/// non-triggered `Classification` carrying the detail string.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification request failed: {0}")]
    Transport(String),

    #[error("classification service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// The outcome of classifying a single text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Per-category scores from the provider, 0.0 (benign) to 1.0.
    pub category_scores: BTreeMap<String, f64>,
    /// Whether any category score crossed the moderation trigger (§ trigger
    /// rule in `mistral::moderation_trigger`).
    pub triggered: bool,
    /// Upstream failure detail, kept for observability. None on success.
    pub error: Option<String>,
}

impl Classification {
    /// A classification standing in for an unavailable provider.
    /// Not triggered, no scores, the failure detail preserved.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            category_scores: BTreeMap::new(),
            triggered: false,
            error: Some(detail.into()),
        }
    }

    /// The maximum category score, 0.0 when no scores are present.
    pub fn max_score(&self) -> f64 {
        self.category_scores
            .values()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Trait for classifying text content. Implementations are async because
/// real providers sit behind HTTP APIs.
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    /// Classify a single text against the given moderation threshold
    /// (pre-clamped to [0.1, 1.0] by the request layer).
    async fn classify(&self, text: &str, threshold: f64)
        -> Result<Classification, ClassifierError>;
}

/// Classifier used when no API key is configured. Returns an empty,
/// non-triggered classification so dictionary and name redaction still run.
pub struct NoopClassifier;

#[async_trait]
impl ContentClassifier for NoopClassifier {
    async fn classify(
        &self,
        _text: &str,
        _threshold: f64,
    ) -> Result<Classification, ClassifierError> {
        Ok(Classification::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_score_empty_is_zero() {
        let c = Classification::default();
        assert_eq!(c.max_score(), 0.0);
    }

    #[test]
    fn max_score_picks_largest_category() {
        let mut c = Classification::default();
        c.category_scores.insert("hate".to_string(), 0.2);
        c.category_scores.insert("violence".to_string(), 0.7);
        c.category_scores.insert("pii".to_string(), 0.4);
        assert_eq!(c.max_score(), 0.7);
    }

    #[tokio::test]
    async fn noop_classifier_never_triggers() {
        let c = NoopClassifier.classify("merde", 0.5).await.unwrap();
        assert!(!c.triggered);
        assert!(c.category_scores.is_empty());
        assert!(c.error.is_none());
    }
}
