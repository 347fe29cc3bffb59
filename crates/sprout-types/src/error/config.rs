//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an endpoint configuration was rejected.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// No constants file at the given path
    #[error("Sprout constants file not found: {path}")]
    NotFound {
        path: String,
    },

    /// The constants document is not JSON of the expected shape
    #[error("Invalid Sprout constants: {message}")]
    ParseError {
        message: String,
    },

    /// A key parsed but holds an unusable value, e.g. a non-http `RouteList`
    #[error("Invalid Sprout constant {field}: {message}")]
    ValidationError {
        /// Wire name of the offending key
        field: String,
        message: String,
    },
}

impl ConfigError {
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.into(), message: message.into() }
    }
}
