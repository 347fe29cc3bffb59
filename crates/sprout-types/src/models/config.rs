//! SDK configuration.
//!
//! Mirrors the static constants resource shipped with the SDK:
//!
//! ```json
//! {
//!   "RouteList": "https://api.example.com/API/Routes",
//!   "Microservices": { "LoggingRelay": "https://logs.example.com" }
//! }
//! ```
//!
//! Every other key is optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};

/// Manifest cache lifetime used when the resource does not set one.
///
/// Roughly 3.5 days. Probably a units slip for a 5 minute (300 000 ms)
/// window; set `ManifestTtlMs` to override.
pub const DEFAULT_MANIFEST_TTL_MS: u64 = 300_000_000;

/// Transport timeout used when the resource does not set one.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_manifest_ttl_ms() -> u64 {
    DEFAULT_MANIFEST_TTL_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_data_field() -> String {
    "Data".to_string()
}

fn default_error_field() -> Option<String> {
    Some("Error".to_string())
}

/// Base URLs of the Sprout microservices the SDK talks to directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Microservices {
    /// Base URL of the logging relay
    pub logging_relay: String,
}

/// How a successful response envelope is turned into the dispatch result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResponseUnwrap {
    /// Return the envelope's data field
    #[default]
    Data,
    /// Return the whole decoded payload
    Raw,
}

/// Response envelope conventions of the Sprout API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ResponsePolicy {
    #[serde(default)]
    pub unwrap: ResponseUnwrap,
    /// Envelope field holding the payload
    #[serde(default = "default_data_field")]
    pub data_field: String,
    /// Envelope field signalling an application error; `None` disables detection
    #[serde(default = "default_error_field")]
    pub error_field: Option<String>,
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self {
            unwrap: ResponseUnwrap::Data,
            data_field: default_data_field(),
            error_field: default_error_field(),
        }
    }
}

/// Full SDK configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SdkConfig {
    /// URL of the route manifest
    #[serde(rename = "RouteList")]
    pub manifest_url: String,
    /// Microservice base URLs
    pub microservices: Microservices,
    /// Manifest cache lifetime in milliseconds
    #[serde(default = "default_manifest_ttl_ms")]
    pub manifest_ttl_ms: u64,
    /// Transport timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Response envelope conventions
    #[serde(default)]
    pub response: ResponsePolicy,
}

impl SdkConfig {
    /// Create a configuration with default cache, timeout and response settings.
    pub fn new(manifest_url: impl Into<String>, logging_relay: impl Into<String>) -> Self {
        Self {
            manifest_url: manifest_url.into(),
            microservices: Microservices { logging_relay: logging_relay.into() },
            manifest_ttl_ms: DEFAULT_MANIFEST_TTL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            response: ResponsePolicy::default(),
        }
    }

    pub fn logging_relay(&self) -> &str {
        &self.microservices.logging_relay
    }
}
