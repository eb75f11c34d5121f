// Web server — Axum-based JSON API over the moderation service.
//
// Routes mirror the operation set one-to-one; every response carries the
// `status: success | warning | error` envelope so callers can distinguish a
// fully persisted mutation from a degraded (applied-but-not-saved) one.
// No auth: the service is meant to sit behind the reviews backend, not on
// the public internet.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::ModerationService;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ModerationService>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(service: Arc<ModerationService>, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState { service });

    let addr = format!("{bind}:{port}");
    info!("Palisade moderation API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the full router. Public so integration tests can drive it with
/// `tower::ServiceExt` instead of a live socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/moderate", post(handlers::moderate::moderate))
        .route("/forbidden_words", get(handlers::words::list))
        .route("/add_forbidden_word", post(handlers::words::add))
        .route("/remove_forbidden_word", post(handlers::words::remove))
        .route("/get_flag_config", get(handlers::flags::show))
        .route("/update_flag_config", post(handlers::flags::update))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deployment health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response in the common envelope.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "status": "error", "message": message })),
    )
        .into_response()
}
