//! Integration tests for [`HttpTransport`] against a local endpoint.
//!
//! Each test binds a throwaway axum server on `127.0.0.1:0` that records
//! what it receives and answers with a fixed status.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use url::Url;

use onboard_client::{
    FormPhase, HttpTransport, OnboardingTransport, SubmissionController, SubmissionError,
    SubmitOutcome,
};
use onboard_core::{validate, RawInput};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One request as seen by the endpoint.
#[derive(Debug, Clone)]
struct Captured {
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Endpoint {
    status: StatusCode,
    seen: Arc<Mutex<Vec<Captured>>>,
}

async fn record(State(endpoint): State<Endpoint>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    endpoint
        .seen
        .lock()
        .unwrap()
        .push(Captured { content_type, body });
    endpoint.status
}

/// Start an endpoint answering `status`; returns its URL and request log.
async fn spawn_endpoint(status: StatusCode) -> (Url, Arc<Mutex<Vec<Captured>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/onboard", post(record))
        .with_state(Endpoint {
            status,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (Url::parse(&format!("http://{addr}/onboard")).unwrap(), seen)
}

/// A URL nothing is listening on.
async fn dead_endpoint() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/onboard")).unwrap()
}

fn future_date() -> String {
    (chrono::Local::now().date_naive() + chrono::Days::new(30))
        .format("%Y-%m-%d")
        .to_string()
}

fn ada() -> RawInput {
    let value = json!({
        "fullName": "Ada Lovelace",
        "email": "ada@example.com",
        "companyName": "Engines Ltd",
        "services": ["Web Dev", "UI/UX"],
        "budgetUsd": 12000,
        "projectStartDate": future_date(),
        "acceptTerms": true,
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Test: JSON body and content type
// ---------------------------------------------------------------------------

#[tokio::test]
async fn posts_normalized_record_as_json() {
    let (url, seen) = spawn_endpoint(StatusCode::OK).await;
    let transport = HttpTransport::new(url).unwrap();
    let input = validate(&ada()).unwrap();

    transport.send(&input).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(seen[0].body["fullName"], "Ada Lovelace");
    assert_eq!(seen[0].body["services"], json!(["UI/UX", "Web Dev"]));
    assert_eq!(seen[0].body["budgetUsd"], 12000);
    assert_eq!(seen[0].body["acceptTerms"], true);
}

// ---------------------------------------------------------------------------
// Test: status classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn any_2xx_is_success() {
    let (url, _seen) = spawn_endpoint(StatusCode::NO_CONTENT).await;
    let transport = HttpTransport::new(url).unwrap();
    let input = validate(&ada()).unwrap();

    assert!(transport.send(&input).await.is_ok());
}

#[tokio::test]
async fn non_2xx_is_http_status_error() {
    let (url, _seen) = spawn_endpoint(StatusCode::UNPROCESSABLE_ENTITY).await;
    let transport = HttpTransport::new(url).unwrap();
    let input = validate(&ada()).unwrap();

    let err = transport.send(&input).await.unwrap_err();
    assert_matches!(err, SubmissionError::HttpStatus(422));
}

#[tokio::test]
async fn unreachable_endpoint_is_request_error() {
    let transport = HttpTransport::new(dead_endpoint().await).unwrap();
    let input = validate(&ada()).unwrap();

    let err = transport.send(&input).await.unwrap_err();
    assert_matches!(err, SubmissionError::Request(_));
}

// ---------------------------------------------------------------------------
// Test: controller over a real HTTP transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn controller_reaches_success_over_http() {
    let (url, seen) = spawn_endpoint(StatusCode::OK).await;
    let controller = SubmissionController::new(HttpTransport::new(url).unwrap());

    let outcome = controller.submit(ada()).await;

    let payload = assert_matches!(outcome, SubmitOutcome::Submitted(p) => p);
    assert_eq!(payload.services, "UI/UX,Web Dev");
    assert_eq!(payload.budget_usd.as_deref(), Some("12000"));
    assert_eq!(controller.phase(), FormPhase::Success);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn controller_recovers_from_500() {
    let (url, seen) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR).await;
    let controller = SubmissionController::new(HttpTransport::new(url).unwrap());

    let outcome = controller.submit(ada()).await;

    assert_matches!(outcome, SubmitOutcome::Failed(_));
    assert_eq!(controller.phase(), FormPhase::IdleWithError);
    assert_eq!(controller.values(), ada());
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn controller_recovers_from_network_failure() {
    let controller = SubmissionController::new(HttpTransport::new(dead_endpoint().await).unwrap());

    let outcome = controller.submit(ada()).await;

    assert_matches!(outcome, SubmitOutcome::Failed(_));
    assert!(controller.server_error().is_some());
    assert!(controller.can_submit());
}
