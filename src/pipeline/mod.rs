// Moderation pipeline — request/result types and the orchestrator.
//
// The pipeline itself is a free function (`review::run`) taking every
// collaborator as a parameter; state ownership lives in the service layer.

pub mod review;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::Classification;
use crate::flags::Verdict;
use crate::redaction::RedactionTrace;

/// Default moderation threshold when the caller doesn't supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Bounds the caller-facing threshold is clamped into.
pub const THRESHOLD_RANGE: (f64, f64) = (0.1, 1.0);

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("the \"text\" field is required and must not be empty")]
    EmptyText,
}

/// A validated moderation request. Out-of-range thresholds are clamped into
/// [0.1, 1.0] rather than rejected, matching the documented behavior.
#[derive(Debug, Clone)]
pub struct ModerationRequest {
    text: String,
    threshold: f64,
}

impl ModerationRequest {
    pub fn new(text: impl Into<String>, threshold: Option<f64>) -> Result<Self, RequestError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        let (min, max) = THRESHOLD_RANGE;
        let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD).clamp(min, max);
        Ok(Self { text, threshold })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Everything a caller needs to act on one moderated review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResult {
    pub original_text: String,
    pub moderated_text: String,
    /// True when any pass changed the text.
    pub is_moderated: bool,
    /// The (clamped) threshold the classifier ran with.
    pub moderation_threshold: f64,
    pub classification: Classification,
    pub details: RedactionTrace,
    pub verdict: Verdict,
    pub moderated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_rejected() {
        assert!(ModerationRequest::new("", None).is_err());
        assert!(ModerationRequest::new("   ", None).is_err());
    }

    #[test]
    fn missing_threshold_uses_default() {
        let req = ModerationRequest::new("bonjour", None).unwrap();
        assert_eq!(req.threshold(), DEFAULT_THRESHOLD);
    }

    #[test]
    fn out_of_range_threshold_is_clamped() {
        let req = ModerationRequest::new("bonjour", Some(5.0)).unwrap();
        assert_eq!(req.threshold(), 1.0);
        let req = ModerationRequest::new("bonjour", Some(0.0)).unwrap();
        assert_eq!(req.threshold(), 0.1);
    }
}
