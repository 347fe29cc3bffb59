#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test: panics are the assertion mechanism")]

mod common;

use common::client_for;
use serde_json::json;
use sprout_client::{ClientError, LogLevel};
use sprout_client::sprout_types::LogEntry;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_LOGS: &str = "/relay/API/Services/svc-1/Logs/Create";

#[tokio::test]
async fn test_log_is_posted_to_service_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_LOGS))
        .and(body_json(json!({"Level": 1, "Title": "Disk", "Content": "90% full"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    assert!(client.log("svc-1", LogLevel::Warning, "Disk", "90% full").await);
}

#[tokio::test]
async fn test_relay_error_status_is_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_LOGS))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    assert!(!client.log("svc-1", LogLevel::Error, "Crash", "boom").await);

    let err = client
        .relay()
        .try_log("svc-1", &LogEntry::new(LogLevel::Info, "t", "c"))
        .await
        .expect_err("500");
    assert!(matches!(err, ClientError::HttpStatus { status: 500, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_relay_is_false() {
    let server = MockServer::start().await;
    let client = client_for(&server, 60_000);
    drop(server);

    assert!(!client.log("svc-1", LogLevel::Info, "Started", "").await);
}
