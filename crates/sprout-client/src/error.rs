//! Error types for the Sprout client.

use serde_json::Value;
use sprout_types::{AccountError, ConfigError};
use thiserror::Error;

/// Errors that can occur when using the Sprout client.
///
/// The plain SDK operations collapse every variant to `None`/`false` after
/// logging it; the `try_*` forms hand it to the caller instead.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Route {route} returned HTTP {status}")]
    HttpStatus {
        /// Route (or endpoint) name.
        route: String,
        /// HTTP status code.
        status: u16,
    },

    /// Response body was not valid JSON.
    #[error("Failed to decode {context}: {message}")]
    Decode {
        /// What was being decoded.
        context: String,
        /// Decoder message.
        message: String,
    },

    /// Request body could not be serialized.
    #[error("Failed to encode {context}: {message}")]
    Encode {
        /// What was being encoded.
        context: String,
        /// Encoder message.
        message: String,
    },

    /// Server signalled an application error in the response envelope.
    #[error("Route {route} returned an error: {error}")]
    Application {
        /// Route name.
        route: String,
        /// Error value from the envelope.
        error: Value,
    },

    /// Route requires authentication but no `Authorization` header was given.
    #[error("Route {route} requires authentication, but no token was provided")]
    MissingAuthorization {
        /// Route name.
        route: String,
    },

    /// A header name or value could not be sent.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Reason it was rejected.
        message: String,
    },

    /// The route manifest could not be fetched.
    #[error("Route manifest unavailable: {source}")]
    ManifestUnavailable {
        /// Why the fetch failed.
        source: Box<ClientError>,
    },

    /// The manifest has no route with this name.
    #[error("Route not found in manifest: {name}")]
    RouteNotFound {
        /// Requested route name.
        name: String,
    },

    /// Response decoded but lacked an expected field.
    #[error("Invalid {context} response: {message}")]
    InvalidResponse {
        /// Operation whose response was invalid.
        context: String,
        /// What was wrong with it.
        message: String,
    },

    /// Local account precondition failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built.
    #[error("HTTP client builder failed: {0}")]
    Build(String),
}

impl ClientError {
    pub(crate) fn invalid_response(context: &str, message: impl Into<String>) -> Self {
        Self::InvalidResponse { context: context.to_string(), message: message.into() }
    }

    pub(crate) fn decode(context: &str, error: &serde_json::Error) -> Self {
        Self::Decode { context: context.to_string(), message: error.to_string() }
    }

    pub(crate) fn encode(context: &str, error: &serde_json::Error) -> Self {
        Self::Encode { context: context.to_string(), message: error.to_string() }
    }

    /// Whether the failure was detected locally, before any network call.
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingAuthorization { .. } | Self::Account(_))
    }
}

/// Log a failed operation once: local refusals at `warn`, the rest at `error`.
pub(crate) fn log_failure(operation: &str, e: &ClientError) {
    if e.is_precondition() {
        tracing::warn!(operation, error = %e, "Operation refused");
    } else {
        tracing::error!(operation, error = %e, "Operation failed");
    }
}

/// Collapse a result to `Option`, logging the failure.
pub(crate) fn collapse<T>(operation: &str, result: Result<T, ClientError>) -> Option<T> {
    result.map_err(|e| log_failure(operation, &e)).ok()
}
