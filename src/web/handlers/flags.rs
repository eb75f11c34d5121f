// Flag configuration handlers.
//
// GET  /get_flag_config    — current RED/GREEN rule configuration
// POST /update_flag_config — partial update, merge semantics

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::flags::FlagConfigPatch;
use crate::service::{Outcome, ServiceError};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct UpdateBody {
    pub flag_config: Option<FlagConfigPatch>,
}

/// GET /get_flag_config
pub async fn show(State(state): State<AppState>) -> Response {
    let config = state.service.flag_config().await;
    Json(serde_json::json!({
        "status": "success",
        "flag_config": config,
    }))
    .into_response()
}

/// POST /update_flag_config
pub async fn update(State(state): State<AppState>, Json(body): Json<UpdateBody>) -> Response {
    let Some(patch) = body.flag_config else {
        return api_error(StatusCode::BAD_REQUEST, "the \"flag_config\" field is required");
    };

    match state.service.update_flag_config(&patch).await {
        Ok(outcome) => {
            let config = state.service.flag_config().await;
            match outcome {
                Outcome::Saved => Json(serde_json::json!({
                    "status": "success",
                    "message": "flag configuration updated",
                    "flag_config": config,
                }))
                .into_response(),
                Outcome::Unsaved(detail) => Json(serde_json::json!({
                    "status": "warning",
                    "message": format!(
                        "flag configuration updated but could not be saved: {detail}"
                    ),
                    "flag_config": config,
                }))
                .into_response(),
            }
        }
        Err(ServiceError::Validation(message)) => api_error(StatusCode::BAD_REQUEST, &message),
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}
