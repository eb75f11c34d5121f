// Moderation handler.
//
// POST /moderate — run one review through the pipeline and return the
// redacted text, the provenance details, and the RED/GREEN verdict.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::service::ServiceError;
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct ModerateBody {
    pub text: Option<String>,
    /// Optional; clamped into [0.1, 1.0]. Defaults to 0.5.
    pub moderation_threshold: Option<f64>,
}

/// POST /moderate — moderate one review.
pub async fn moderate(State(state): State<AppState>, Json(body): Json<ModerateBody>) -> Response {
    let text = body.text.unwrap_or_default();

    match state
        .service
        .moderate(&text, body.moderation_threshold)
        .await
    {
        Ok(result) => Json(serde_json::json!({
            "status": "success",
            "original_text": result.original_text,
            "moderated_text": result.moderated_text,
            "is_moderated": result.is_moderated,
            "moderation_threshold": result.moderation_threshold,
            "flag": result.verdict.flag,
            "flag_reasons": result.verdict.reasons,
            "classification": result.classification,
            "moderation_details": result.details,
            "moderated_at": result.moderated_at,
        }))
        .into_response(),
        Err(ServiceError::Validation(message)) => api_error(StatusCode::BAD_REQUEST, &message),
        Err(e) => {
            tracing::error!(error = %e, "moderation failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
