#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test: panics are the assertion mechanism")]

mod common;

use common::{client_for, mount_manifest};
use serde_json::json;
use sprout_client::{bearer, ClientError, Params};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn test_authenticated_route_without_token_never_hits_network() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(path("/API/Accounts/Me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    assert!(client.call("FetchMyAccount", &none, &none, &none, None).await.is_none());

    let err = client
        .try_call("FetchMyAccount", &none, &none, &none, None)
        .await
        .expect_err("no token");
    assert!(matches!(err, ClientError::MissingAuthorization { .. }));
    assert!(err.is_precondition());
}

#[tokio::test]
async fn test_authorization_header_is_case_insensitive() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(method("GET"))
        .and(path("/API/Accounts/Me"))
        .and(header("authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let headers = params(&[("AUTHORIZATION", "Bearer t")]);
    let value = client.call("FetchMyAccount", &headers, &none, &none, None).await;
    assert_eq!(value, Some(json!({"ok": true})));
}

#[tokio::test]
async fn test_empty_authorization_never_hits_network() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Data": {"Success": true}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let headers = params(&[("Authorization", "")]);
    assert!(client.call("DeleteAccount", &headers, &none, &none, None).await.is_none());
}

#[tokio::test]
async fn test_http_error_status_is_a_failure() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(path("/API/Accounts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let err = client
        .try_call("FetchAccountByID", &none, &none, &params(&[("id", "missing")]), None)
        .await
        .expect_err("404");
    assert!(matches!(err, ClientError::HttpStatus { status: 404, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_error_envelope_is_a_failure() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(path("/API/Accounts/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Error": "x"})))
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let path_params = params(&[("id", "x")]);
    assert!(client.call("FetchAccountByID", &none, &none, &path_params, None).await.is_none());
}

#[tokio::test]
async fn test_non_json_body_is_a_failure() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(path("/API/Accounts/x"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let err = client
        .try_call("FetchAccountByID", &none, &none, &params(&[("id", "x")]), None)
        .await
        .expect_err("html body");
    assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_data_field_is_unwrapped() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(path("/API/Accounts/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Data": {"ok": true}})))
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let value = client.call("FetchAccountByID", &none, &none, &params(&[("id", "x")]), None).await;
    assert_eq!(value, Some(json!({"ok": true})));
}

#[tokio::test]
async fn test_path_and_query_reach_the_server() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(method("GET"))
        .and(path("/API/Search/accounts"))
        .and(query_param("q", "fern moss"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let value = client
        .call(
            "Search",
            &Params::new(),
            &params(&[("q", "fern moss"), ("limit", "5")]),
            &params(&[("scope", "accounts")]),
            None,
        )
        .await;
    assert_eq!(value, Some(json!([])));
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;
    mount_manifest(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/API/Accounts/Me/Integrations"))
        .and(wiremock::matchers::body_json(json!({"hello": "world"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Data": {"ok": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 60_000);
    let none = Params::new();
    let body = json!({"hello": "world"});
    let value =
        client.call("UpdateAccountIntegrations", &bearer("t"), &none, &none, Some(&body)).await;
    assert_eq!(value, Some(json!({"ok": 1})));
}

#[tokio::test]
async fn test_unreachable_manifest_reports_unavailable() {
    let server = MockServer::start().await;
    let client = client_for(&server, 60_000);
    drop(server);

    let none = Params::new();
    let err = client
        .try_call("FetchAccountByID", &none, &none, &none, None)
        .await
        .expect_err("server gone");
    match err {
        ClientError::ManifestUnavailable { source } => {
            assert!(matches!(*source, ClientError::Transport(_)), "got {source:?}");
        },
        other => panic!("expected ManifestUnavailable, got {other:?}"),
    }
}
