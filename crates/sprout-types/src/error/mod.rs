//! Typed error definitions for the Sprout SDK.
//!
//! These cover failures detected locally, before any network traffic:
//! account capability checks and configuration loading. Transport and
//! response failures live in `sprout-client`, next to the HTTP stack.
//!
//! All errors are:
//!
//! - **Serializable** via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod account;
mod config;

pub use account::AccountError;
pub use config::ConfigError;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::AccountFlag;

    #[test]
    fn test_error_serialization() {
        let err = AccountError::MissingFlag {
            username: "fern".to_string(),
            flag: AccountFlag::Developer,
        };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("MissingFlag"));
        assert!(json.contains("fern"));

        let deserialized: AccountError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::ValidationError {
            field: "RouteList".to_string(),
            message: "relative URL without a base".to_string(),
        };

        let msg = format!("{}", err);
        assert!(msg.contains("RouteList"));
        assert!(msg.contains("relative URL"));
    }
}
