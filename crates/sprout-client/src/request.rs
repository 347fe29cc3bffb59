//! Route-driven request dispatcher.
//!
//! Turns a manifest [`RouteDescriptor`] plus headers, query parameters, path
//! parameters and an optional JSON body into exactly one HTTP call. There is
//! no retry and no backoff; every failure is final for that call.

use std::collections::HashMap;
use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::{Captures, Regex};
use reqwest::Client;
use serde_json::Value;
use sprout_types::{ResponsePolicy, ResponseUnwrap, RouteDescriptor};

use crate::error::{collapse, ClientError};
use crate::http::{build_headers, has_authorization, to_method};

/// String parameters keyed by name (headers, query, path).
pub type Params = HashMap<String, String>;

/// Characters escaped in a substituted path value, so it stays one segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

static PATH_PARAM_REGEX: OnceLock<Regex> = OnceLock::new();

fn path_param_regex() -> &'static Regex {
    PATH_PARAM_REGEX
        .get_or_init(|| Regex::new(r":([a-zA-Z0-9]+)").expect("Path param regex is valid"))
}

/// Replace every `:name` placeholder in the template's path with the
/// percent-encoded `path_params[name]`. Unknown placeholders and empty values
/// leave the placeholder as it is; the scheme and authority (including any
/// port) are never touched.
pub fn substitute_path_params(template: &str, path_params: &Params) -> String {
    let path_start = match template.find("://") {
        Some(scheme_end) => {
            let after_scheme = scheme_end + 3;
            template[after_scheme..].find('/').map_or(template.len(), |i| after_scheme + i)
        },
        None => 0,
    };
    let (origin, path) = template.split_at(path_start);

    let replaced = path_param_regex().replace_all(path, |caps: &Captures<'_>| {
        match path_params.get(&caps[1]).filter(|v| !v.is_empty()) {
            Some(value) => utf8_percent_encode(value, PATH_SEGMENT).to_string(),
            None => caps[0].to_string(),
        }
    });
    format!("{origin}{replaced}")
}

/// URL-encode query parameters. An empty map gives an empty string.
pub fn build_query_string(query: &Params) -> String {
    url::form_urlencoded::Serializer::new(String::new()).extend_pairs(query.iter()).finish()
}

/// Final request URL: substituted template, `?`, then the query string.
/// The `?` is always present, even with no parameters.
pub fn build_request_url(template: &str, path_params: &Params, query: &Params) -> String {
    format!("{}?{}", substitute_path_params(template, path_params), build_query_string(query))
}

/// JavaScript-style truthiness, used to decide whether an envelope's error
/// field actually reports an error.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Apply the response policy to a decoded payload.
pub(crate) fn unwrap_payload(
    route: &str,
    payload: Value,
    policy: &ResponsePolicy,
) -> Result<Value, ClientError> {
    if let Some(field) = policy.error_field.as_deref() {
        if let Some(error) = payload.get(field).filter(|v| is_truthy(v)) {
            return Err(ClientError::Application { route: route.to_string(), error: error.clone() });
        }
    }

    match policy.unwrap {
        ResponseUnwrap::Raw => Ok(payload),
        ResponseUnwrap::Data => match payload.get(&policy.data_field) {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(ClientError::invalid_response(
                route,
                format!("missing {} field", policy.data_field),
            )),
        },
    }
}

/// Performs one HTTP call per route invocation.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: Client,
    policy: ResponsePolicy,
}

impl Dispatcher {
    pub fn new(http: Client, policy: ResponsePolicy) -> Self {
        Self { http, policy }
    }

    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    /// Dispatch and collapse any failure to `None` after logging it.
    pub async fn dispatch(
        &self,
        route: &RouteDescriptor,
        headers: &Params,
        query: &Params,
        path_params: &Params,
        body: Option<&Value>,
    ) -> Option<Value> {
        collapse(&route.name, self.try_dispatch(route, headers, query, path_params, body).await)
    }

    pub async fn try_dispatch(
        &self,
        route: &RouteDescriptor,
        headers: &Params,
        query: &Params,
        path_params: &Params,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        if route.requires_auth && !has_authorization(headers) {
            return Err(ClientError::MissingAuthorization { route: route.name.clone() });
        }

        let url = build_request_url(&route.url, path_params, query);
        let mut request =
            self.http.request(to_method(route.method), &url).headers(build_headers(headers)?);
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(route = %route.name, method = %route.method, "Dispatching request");
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                route: route.name.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        let payload: Value =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(&route.name, &e))?;
        unwrap_payload(&route.name, payload, &self.policy)
    }
}
