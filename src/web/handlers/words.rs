// Forbidden-word list handlers.
//
// GET  /forbidden_words       — current word -> mask mapping
// POST /add_forbidden_word    — add a word (lowercased, mask derived)
// POST /remove_forbidden_word — remove a word; 404 when absent
//
// Mutations answer `status: warning` when the list was updated in memory
// but could not be written back to the store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::service::{Outcome, ServiceError};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct WordBody {
    pub word: Option<String>,
}

/// GET /forbidden_words
pub async fn list(State(state): State<AppState>) -> Response {
    let words = state.service.list_words().await;
    Json(serde_json::json!({
        "status": "success",
        "forbidden_words": words,
    }))
    .into_response()
}

/// POST /add_forbidden_word
pub async fn add(State(state): State<AppState>, Json(body): Json<WordBody>) -> Response {
    let word = body.word.unwrap_or_default();

    match state.service.add_word(&word).await {
        Ok((word, _mask, outcome)) => {
            let dictionary = state.service.list_words().await;
            match outcome {
                Outcome::Saved => Json(serde_json::json!({
                    "status": "success",
                    "message": format!("the word \"{word}\" was added to the forbidden-word list"),
                    "current_dictionary": dictionary,
                }))
                .into_response(),
                Outcome::Unsaved(detail) => Json(serde_json::json!({
                    "status": "warning",
                    "message": format!(
                        "the word \"{word}\" was added but the list could not be saved: {detail}"
                    ),
                    "current_dictionary": dictionary,
                }))
                .into_response(),
            }
        }
        Err(ServiceError::Validation(message)) => api_error(StatusCode::BAD_REQUEST, &message),
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// POST /remove_forbidden_word
pub async fn remove(State(state): State<AppState>, Json(body): Json<WordBody>) -> Response {
    let word = body.word.unwrap_or_default();
    if word.trim().is_empty() {
        return api_error(
            StatusCode::BAD_REQUEST,
            "the \"word\" field is required and must not be empty",
        );
    }

    match state.service.remove_word(&word).await {
        Ok(outcome) => {
            let dictionary = state.service.list_words().await;
            match outcome {
                Outcome::Saved => Json(serde_json::json!({
                    "status": "success",
                    "message": format!(
                        "the word \"{}\" was removed from the forbidden-word list",
                        word.trim().to_lowercase()
                    ),
                    "current_dictionary": dictionary,
                }))
                .into_response(),
                Outcome::Unsaved(detail) => Json(serde_json::json!({
                    "status": "warning",
                    "message": format!(
                        "the word was removed but the list could not be saved: {detail}"
                    ),
                    "current_dictionary": dictionary,
                }))
                .into_response(),
            }
        }
        Err(ServiceError::NotFound(word)) => api_error(
            StatusCode::NOT_FOUND,
            &format!("the word \"{word}\" is not in the forbidden-word list"),
        ),
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}
