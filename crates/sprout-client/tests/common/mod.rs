#![allow(dead_code)]

use serde_json::{json, Value};
use sprout_client::{SdkConfig, SproutClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MANIFEST_PATH: &str = "/API/Routes";
pub const RELAY_PATH: &str = "/relay";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Manifest whose routes all point at the mock server.
pub fn manifest_body(base: &str) -> Value {
    json!({
        "Data": {
            "Routes": {
                "FetchAccountByID": {
                    "URL": format!("{base}/API/Accounts/:id"),
                    "Method": "GET",
                    "Authenticated": false
                },
                "FetchAccountByUsername": {
                    "URL": format!("{base}/API/Accounts/Username/:username"),
                    "Method": "GET",
                    "Authenticated": false
                },
                "FetchMyAccount": {
                    "URL": format!("{base}/API/Accounts/Me"),
                    "Method": "GET",
                    "Authenticated": true
                },
                "DeleteAccount": {
                    "URL": format!("{base}/API/Accounts/Me"),
                    "Method": "DELETE",
                    "Authenticated": true
                },
                "GetAccountIntegrations": {
                    "URL": format!("{base}/API/Accounts/Me/Integrations"),
                    "Method": "GET",
                    "Authenticated": true
                },
                "UpdateAccountIntegrations": {
                    "URL": format!("{base}/API/Accounts/Me/Integrations"),
                    "Method": "PATCH",
                    "Authenticated": true
                },
                "ManageIntegrationsByID": {
                    "URL": format!("{base}/API/Accounts/:id/Integrations"),
                    "Method": "PATCH",
                    "Authenticated": true
                },
                "Search": {
                    "URL": format!("{base}/API/Search/:scope"),
                    "Method": "GET",
                    "Authenticated": false
                }
            }
        }
    })
}

pub async fn mount_manifest(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(MANIFEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest_body(&server.uri())))
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer, ttl_ms: u64) -> SdkConfig {
    let mut config = SdkConfig::new(
        format!("{}{MANIFEST_PATH}", server.uri()),
        format!("{}{RELAY_PATH}", server.uri()),
    );
    config.manifest_ttl_ms = ttl_ms;
    config.request_timeout_secs = 5;
    config
}

pub fn client_for(server: &MockServer, ttl_ms: u64) -> SproutClient {
    init_tracing();
    SproutClient::new(config_for(server, ttl_ms)).expect("client builds")
}

pub fn account_body(uid: &str, username: &str, flags: &[&str]) -> Value {
    json!({
        "UID": uid,
        "Username": username,
        "Email": format!("{username}@example.com"),
        "Flags": flags,
        "Settings": {},
        "Integrations": {"github": {"login": username}},
        "Verification": {"Email": true}
    })
}
