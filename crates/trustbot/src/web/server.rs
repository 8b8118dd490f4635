//! Per-instance HTTP server
//!
//! Serves three routes: `POST /webhook` (push mode only) accepts
//! platform updates and acknowledges as soon as the payload is parsed
//! and queued; `GET /health` reports the supervisor's liveness; `GET /`
//! is a static liveness page for platform probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use teloxide::types::Update as TgUpdate;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::Supervisor;

/// Shared state for one instance's HTTP server.
#[derive(Clone)]
pub struct WebState {
    pub lang: &'static str,
    pub supervisor: Arc<Supervisor>,
    /// Queue into the instance's update worker. `None` in polling mode,
    /// where no webhook route is mounted.
    pub updates: Option<UnboundedSender<TgUpdate>>,
}

/// Builds the router for one instance.
pub fn router(state: WebState) -> Router {
    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler));

    if state.updates.is_some() {
        app = app.route("/webhook", post(webhook_handler));
    }

    app.with_state(state)
}

/// POST /webhook: parse synchronously, hand off, acknowledge.
///
/// The queue send never blocks, so the response time is independent of
/// handler latency; the platform's delivery timeout only ever covers the
/// JSON parse. A malformed payload is dropped with a 5xx; redelivery is
/// the platform's business, not ours.
async fn webhook_handler(State(state): State<WebState>, body: String) -> Response {
    let update: TgUpdate = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(e) => {
            log::warn!("[{}] rejected malformed webhook payload: {}", state.lang, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "malformed update payload").into_response();
        }
    };

    let Some(queue) = &state.updates else {
        // The route is only mounted in push mode; treat a stray call as
        // a server-side problem rather than dropping it silently.
        return (StatusCode::INTERNAL_SERVER_ERROR, "webhook ingestion not active").into_response();
    };

    if queue.send(update).is_err() {
        log::error!("[{}] update worker is gone, dropping update", state.lang);
        return (StatusCode::INTERNAL_SERVER_ERROR, "update worker unavailable").into_response();
    }

    (StatusCode::OK, "OK").into_response()
}

/// GET /health: liveness for the external probe.
async fn health_handler(State(state): State<WebState>) -> impl IntoResponse {
    Json(json!({
        "status": state.supervisor.state().as_health_str(),
        "bot": state.lang,
    }))
}

/// GET /: static liveness page.
async fn root_handler(State(state): State<WebState>) -> impl IntoResponse {
    Json(json!({
        "service": "trustbot",
        "bot": state.lang,
        "endpoints": {
            "/health": "liveness (JSON)",
            "/webhook": "platform updates (push mode only)",
        },
    }))
}
