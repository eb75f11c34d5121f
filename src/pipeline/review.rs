// The moderation pipeline: classify, redact words, redact names, flag.
//
// The four stages always run in this order and none is skipped: a failed
// classifier call is downgraded to "not triggered" and the lexical and name
// passes still apply. Only request validation (done before entry) can stop
// a review from going through.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, warn};

use crate::classifier::{Classification, ContentClassifier};
use crate::flags::{determine_flag, FlagConfig};
use crate::redaction::{lexical, names, RedactionTrace};

use super::{ModerationRequest, ModerationResult};

/// Run one review through the full pipeline.
///
/// `dictionary` and `config` are consistent snapshots taken by the caller;
/// the pipeline never touches shared state.
pub async fn run(
    classifier: &dyn ContentClassifier,
    dictionary: &BTreeMap<String, String>,
    config: &FlagConfig,
    request: &ModerationRequest,
) -> ModerationResult {
    let classification = match classifier
        .classify(request.text(), request.threshold())
        .await
    {
        Ok(classification) => classification,
        Err(e) => {
            warn!(error = %e, "classifier unavailable, continuing without it");
            Classification::unavailable(e.to_string())
        }
    };

    let mut trace = RedactionTrace::default();

    let after_words = lexical::redact(
        request.text(),
        classification.triggered,
        dictionary,
        &mut trace,
    );
    let moderated = names::redact_names(&after_words, &mut trace);

    let verdict = determine_flag(&classification, &trace, request.text(), &moderated, config);

    debug!(
        flag = %verdict.flag,
        words = trace.word_count(),
        names = trace.names.len(),
        triggered = classification.triggered,
        "Moderated review"
    );

    ModerationResult {
        is_moderated: moderated != request.text(),
        original_text: request.text().to_string(),
        moderated_text: moderated,
        moderation_threshold: request.threshold(),
        classification,
        details: trace,
        verdict,
        moderated_at: Utc::now(),
    }
}
