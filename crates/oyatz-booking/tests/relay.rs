// ABOUTME: Tests RelayTransport against a local axum server standing in for the relay.
// ABOUTME: Checks the posted JSON body and how relay replies map to outcomes.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use oyatz_booking::{
    BookingError, BookingForm, BookingSummary, RelayConfig, RelayMessage, RelayTransport, Service,
    Transport,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Relay {
    received: Arc<Mutex<Vec<Value>>>,
    reply: (StatusCode, Value),
}

async fn submit(State(relay): State<Relay>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    relay.received.lock().unwrap().push(body);
    (relay.reply.0, Json(relay.reply.1.clone()))
}

async fn spawn_relay(reply: (StatusCode, Value)) -> (String, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/submit", post(submit)).with_state(Relay {
        received: received.clone(),
        reply,
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/submit"), received)
}

fn transport(endpoint: &str) -> RelayTransport {
    RelayTransport::new(&RelayConfig {
        endpoint: endpoint.to_string(),
        access_key: "test-key".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn message() -> RelayMessage {
    let mut form = BookingForm::new();
    form.set_name("Ada");
    form.toggle_service(Service::Twists);
    form.toggle_service(Service::Consultation);
    RelayMessage::booking(&BookingSummary::new(&form, "OYATZ Hair"), None)
}

#[tokio::test]
async fn test_relay_accepts_message() {
    let (endpoint, received) = spawn_relay((
        StatusCode::OK,
        json!({"success": true, "message": "Email sent successfully!"}),
    ))
    .await;

    let relay = transport(&endpoint);
    assert_eq!(relay.endpoint(), endpoint);
    relay.deliver(&message()).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let body = &received[0];
    assert_eq!(body["access_key"], "test-key");
    assert_eq!(body["subject"], "New Booking Request from OYATZ Hair Website");
    assert_eq!(body["from_name"], "OYATZ Hair Website");
    assert_eq!(body["Name"], "Ada");
    assert_eq!(body["Email"], "Not provided");
    assert!(body.get("replyto").is_none());
}

#[tokio::test]
async fn test_relay_reports_rejection() {
    let (endpoint, _) = spawn_relay((
        StatusCode::OK,
        json!({"success": false, "message": "Invalid access key"}),
    ))
    .await;

    let err = transport(&endpoint).deliver(&message()).await.unwrap_err();
    match err {
        BookingError::Relay { status, message } => {
            assert_eq!(status, 200);
            assert_eq!(message, "Invalid access key");
        }
        other => panic!("expected relay rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_relay_server_error() {
    let (endpoint, _) = spawn_relay((
        StatusCode::TOO_MANY_REQUESTS,
        json!({"success": false, "message": "Too many requests"}),
    ))
    .await;

    let err = transport(&endpoint).deliver(&message()).await.unwrap_err();
    assert!(matches!(err, BookingError::Relay { status: 429, .. }));
}

#[tokio::test]
async fn test_unreachable_relay_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport(&format!("http://{addr}/submit"))
        .deliver(&message())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Http(_)));
}
