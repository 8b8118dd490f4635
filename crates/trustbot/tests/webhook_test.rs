//! Webhook ingestion tests
//!
//! Driven directly against the axum router with `tower::ServiceExt`:
//! no listener, no Telegram. The properties under test: malformed
//! payloads are rejected without poisoning the stream, the handoff to
//! the worker never blocks the HTTP response, and the health endpoints
//! reflect the supervisor.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use teloxide::types::Update as TgUpdate;
use tokio::sync::mpsc;
use tower::ServiceExt;
use trustbot::core::{LivenessState, Supervisor};
use trustbot::web::{router, WebState};

fn valid_update_json() -> String {
    serde_json::json!({
        "update_id": 10000,
        "message": {
            "message_id": 1,
            "date": 1234567890,
            "chat": {"id": 123456789, "type": "private", "first_name": "Test"},
            "from": {"id": 123456789, "is_bot": false, "first_name": "Test", "username": "testuser"},
            "text": "/start"
        }
    })
    .to_string()
}

fn webhook_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn push_state() -> (WebState, mpsc::UnboundedReceiver<TgUpdate>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = WebState {
        lang: "en",
        supervisor: Arc::new(Supervisor::new("en")),
        updates: Some(tx),
    };
    (state, rx)
}

#[tokio::test]
async fn well_formed_payload_is_acknowledged_and_queued() {
    let (state, mut rx) = push_state();
    let app = router(state);

    let response = app.oneshot(webhook_request(&valid_update_json())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");

    let queued = rx.recv().await.expect("update should be queued");
    match queued.kind {
        teloxide::types::UpdateKind::Message(msg) => assert_eq!(msg.text(), Some("/start")),
        other => panic!("unexpected update kind: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_yields_5xx_without_poisoning_the_stream() {
    let (state, mut rx) = push_state();
    let app = router(state);

    let response = app
        .clone()
        .oneshot(webhook_request("{this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The very next valid request must still be served.
    let response = app.oneshot(webhook_request(&valid_update_json())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(rx.recv().await.is_some());
}

#[tokio::test]
async fn handoff_does_not_block_on_a_slow_handler() {
    let (state, mut rx) = push_state();
    let app = router(state);

    // An artificially slow consumer: each queued update takes 5 seconds.
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    });

    for _ in 0..3 {
        let started = Instant::now();
        let response = app
            .clone()
            .oneshot(webhook_request(&valid_update_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            started.elapsed() < Duration::from_millis(200),
            "webhook response blocked on handler latency: {:?}",
            started.elapsed()
        );
    }
}

#[tokio::test]
async fn health_reflects_the_supervisor() {
    let supervisor = Arc::new(Supervisor::new("fr"));
    let app = router(WebState {
        lang: "fr",
        supervisor: Arc::clone(&supervisor),
        updates: None,
    });

    let get_health = |app: axum::Router| async move {
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice::<serde_json::Value>(&body).unwrap()
    };

    supervisor.advance(LivenessState::Running);
    let body = get_health(app.clone()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["bot"], "fr");

    supervisor.advance(LivenessState::Stopping);
    let body = get_health(app).await;
    assert_eq!(body["status"], "stopping");
    assert_eq!(body["bot"], "fr");
}

#[tokio::test]
async fn root_serves_static_liveness_page() {
    let (state, _rx) = push_state();
    let app = router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["bot"], "en");
}

#[tokio::test]
async fn polling_mode_serves_no_webhook_route() {
    let app = router(WebState {
        lang: "ar",
        supervisor: Arc::new(Supervisor::new("ar")),
        updates: None,
    });

    let response = app.oneshot(webhook_request(&valid_update_json())).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
