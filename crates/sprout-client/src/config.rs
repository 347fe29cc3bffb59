//! Configuration loading.
//!
//! The SDK ships its service endpoints as a static JSON resource compiled into
//! the crate. Deployments point it elsewhere through environment variables or
//! by loading a file of the same shape.

use std::fs;
use std::path::Path;

use sprout_types::{ConfigError, SdkConfig};

const DEFAULT_CONSTANTS: &str = include_str!("../config/constants.json");

const ENV_ROUTE_LIST_URL: &str = "SPROUT_ROUTE_LIST_URL";
const ENV_LOGGING_RELAY_URL: &str = "SPROUT_LOGGING_RELAY_URL";
const ENV_MANIFEST_TTL_MS: &str = "SPROUT_MANIFEST_TTL_MS";
const ENV_REQUEST_TIMEOUT_SECS: &str = "SPROUT_REQUEST_TIMEOUT_SECS";

/// Load the embedded configuration and apply environment overrides.
pub fn load_config() -> Result<SdkConfig, ConfigError> {
    let mut config = parse_config(DEFAULT_CONSTANTS)?;
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a JSON file. Environment overrides are not applied.
pub fn load_config_from_path(path: &Path) -> Result<SdkConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    parse_config(&content)
}

/// Parse and validate a configuration document.
pub fn parse_config(raw: &str) -> Result<SdkConfig, ConfigError> {
    let config: SdkConfig =
        serde_json::from_str(raw).map_err(|e| ConfigError::from_json_error(&e))?;
    validate(&config)?;
    Ok(config)
}

fn apply_overrides(config: &mut SdkConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = url_override(ENV_ROUTE_LIST_URL, lookup(ENV_ROUTE_LIST_URL)) {
        config.manifest_url = url;
    }
    if let Some(url) = url_override(ENV_LOGGING_RELAY_URL, lookup(ENV_LOGGING_RELAY_URL)) {
        config.microservices.logging_relay = url;
    }
    if let Some(ttl) = number_override(ENV_MANIFEST_TTL_MS, lookup(ENV_MANIFEST_TTL_MS)) {
        config.manifest_ttl_ms = ttl;
    }
    if let Some(secs) = number_override(ENV_REQUEST_TIMEOUT_SECS, lookup(ENV_REQUEST_TIMEOUT_SECS))
    {
        config.request_timeout_secs = secs;
    }
}

fn url_override(key: &str, raw: Option<String>) -> Option<String> {
    let url = raw?.trim().trim_end_matches('/').to_string();
    if url.is_empty() {
        tracing::warn!(key, "Override is empty, keeping configured URL");
        return None;
    }
    if check_url(&url).is_err() {
        tracing::warn!(key, "Override is not a valid http(s) URL, keeping configured URL");
        return None;
    }
    tracing::info!(key, "Using URL override");
    Some(url)
}

fn number_override(key: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Override is not a number, ignoring");
            None
        },
    }
}

fn check_url(raw: &str) -> Result<(), String> {
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme {other}")),
    }
}

fn validate(config: &SdkConfig) -> Result<(), ConfigError> {
    check_url(&config.manifest_url).map_err(|m| ConfigError::invalid("RouteList", m))?;
    check_url(config.logging_relay())
        .map_err(|m| ConfigError::invalid("Microservices.LoggingRelay", m))?;
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::invalid("RequestTimeoutSecs", "must be greater than zero"));
    }
    Ok(())
}
