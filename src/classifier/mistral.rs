// Mistral moderation API implementation.
//
// POSTs the text to /v1/moderations and maps the per-category scores into a
// Classification. The request carries a fixed 10-second timeout; a slow or
// failing provider must not hold a review hostage.
//
// API docs: https://docs.mistral.ai/capabilities/guardrailing/

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{Classification, ClassifierError, ContentClassifier};

/// Fixed timeout for the moderation call. The pipeline continues without a
/// classification when this elapses.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MODERATION_MODEL: &str = "mistral-moderation-latest";

/// Compute the score level at which a category trips moderation.
///
/// `threshold` is the caller-facing knob in [0.1, 1.0]; the trigger is
/// `1.0 - threshold + 0.1`, so a threshold of 1.0 trips on any score >= 0.1
/// and a threshold of 0.1 only trips on a certain 1.0.
pub fn moderation_trigger(threshold: f64) -> f64 {
    1.0 - threshold + 0.1
}

/// Mistral moderation API classifier.
pub struct MistralClassifier {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MistralClassifier {
    /// Create a new classifier with the given API key and base URL
    /// (normally `https://api.mistral.ai`).
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ContentClassifier for MistralClassifier {
    async fn classify(
        &self,
        text: &str,
        threshold: f64,
    ) -> Result<Classification, ClassifierError> {
        let url = format!("{}/v1/moderations", self.base_url);

        let request = ModerationRequest {
            model: MODERATION_MODEL,
            input: vec![text.to_string()],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }

        let parsed: ModerationResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        let trigger = moderation_trigger(threshold);

        // The API scores each input segment separately; any segment's
        // category crossing the trigger is enough.
        let mut triggered = false;
        let mut category_scores = BTreeMap::new();
        for result in &parsed.results {
            for (category, score) in &result.category_scores {
                if *score >= trigger {
                    triggered = true;
                }
                // Keep the worst score seen per category across segments.
                let entry = category_scores.entry(category.clone()).or_insert(0.0);
                if *score > *entry {
                    *entry = *score;
                }
            }
        }

        debug!(
            triggered,
            trigger,
            categories = category_scores.len(),
            text_preview = text.chars().take(50).collect::<String>().as_str(),
            "Classified text"
        );

        Ok(Classification {
            category_scores,
            triggered,
            error: None,
        })
    }
}

// --- Mistral API request/response types ---

#[derive(Serialize)]
struct ModerationRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<ModerationResult>,
}

#[derive(Deserialize)]
struct ModerationResult {
    #[serde(default)]
    category_scores: BTreeMap<String, f64>,
}
