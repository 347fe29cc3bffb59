//! HTTP client construction and request plumbing shared by every component.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method};
use sprout_types::HttpMethod;

use crate::error::ClientError;

const USER_AGENT: &str = concat!("sprout-client/", env!("CARGO_PKG_VERSION"));

/// Create the HTTP client used by the cache, the dispatcher and the relay.
///
/// The timeout is the only one in the stack; nothing above the transport
/// cancels or retries a request.
pub fn create_client(timeout_secs: u64) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .tcp_nodelay(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClientError::Build(e.to_string()))
}

/// Header map carrying `Authorization: Bearer <token>`.
pub fn bearer(token: &str) -> HashMap<String, String> {
    HashMap::from([(AUTHORIZATION.as_str().to_string(), format!("Bearer {token}"))])
}

/// Whether the given headers carry a non-empty `Authorization` entry (any casing).
pub fn has_authorization(headers: &HashMap<String, String>) -> bool {
    headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) && !value.is_empty())
}

pub(crate) fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap, ClientError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ClientError::InvalidHeader { name: name.clone(), message: e.to_string() }
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ClientError::InvalidHeader { name: name.clone(), message: e.to_string() }
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

pub(crate) fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}
