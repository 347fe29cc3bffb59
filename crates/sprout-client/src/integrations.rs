//! Token-level integration operations.
//!
//! The account facade wraps these; they are public for callers that only
//! hold a token.

use serde_json::Value;
use sprout_types::models::route::names;
use sprout_types::{Account, AccountError, AccountFlag, IntegrationUpdate, Integrations};

use crate::client::SproutClient;
use crate::error::{collapse, ClientError};
use crate::http::bearer;
use crate::request::Params;

/// Pull the `Integrations` object out of an integration route's response.
fn integrations_from(context: &str, data: Value) -> Result<Integrations, ClientError> {
    match data {
        Value::Object(mut obj) => match obj.remove("Integrations") {
            Some(Value::Object(integrations)) => Ok(integrations),
            _ => Err(ClientError::invalid_response(context, "missing Integrations object")),
        },
        _ => Err(ClientError::invalid_response(context, "expected an object")),
    }
}

/// An empty token is no token.
pub(crate) fn non_empty_token<'a>(
    token: Option<&'a str>,
    operation: &str,
) -> Result<&'a str, ClientError> {
    token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AccountError::missing_token(operation).into())
}

/// Latest integrations of the token's owner.
pub async fn get_account_integrations(client: &SproutClient, token: &str) -> Option<Integrations> {
    collapse("get integrations", try_get_account_integrations(client, token).await)
}

pub async fn try_get_account_integrations(
    client: &SproutClient,
    token: &str,
) -> Result<Integrations, ClientError> {
    let token = non_empty_token(Some(token), "get integrations")?;
    let data = client
        .try_call(
            names::GET_ACCOUNT_INTEGRATIONS,
            &bearer(token),
            &Params::new(),
            &Params::new(),
            None,
        )
        .await?;
    integrations_from(names::GET_ACCOUNT_INTEGRATIONS, data)
}

/// Replace one service's integration data; returns the server's updated integrations.
pub async fn update_account_integrations(
    client: &SproutClient,
    service: &str,
    data: Value,
    token: &str,
) -> Option<Integrations> {
    collapse(
        "update integrations",
        try_update_account_integrations(client, service, data, token).await,
    )
}

pub async fn try_update_account_integrations(
    client: &SproutClient,
    service: &str,
    data: Value,
    token: &str,
) -> Result<Integrations, ClientError> {
    let token = non_empty_token(Some(token), "update integrations")?;
    let body = serde_json::to_value(IntegrationUpdate::new(service, data))
        .map_err(|e| ClientError::encode("integration update", &e))?;
    let data = client
        .try_call(
            names::UPDATE_ACCOUNT_INTEGRATIONS,
            &bearer(token),
            &Params::new(),
            &Params::new(),
            Some(&body),
        )
        .await?;
    integrations_from(names::UPDATE_ACCOUNT_INTEGRATIONS, data)
}

/// Overwrite another account's integrations. The caller must be a developer
/// and hold a token; both are checked before any network call.
pub async fn forcibly_update_integrations(
    client: &SproutClient,
    caller: &Account,
    caller_token: Option<&str>,
    target_uid: &str,
    update: &IntegrationUpdate,
) -> Option<Integrations> {
    collapse(
        "forcibly update integrations",
        try_forcibly_update_integrations(client, caller, caller_token, target_uid, update).await,
    )
}

pub async fn try_forcibly_update_integrations(
    client: &SproutClient,
    caller: &Account,
    caller_token: Option<&str>,
    target_uid: &str,
    update: &IntegrationUpdate,
) -> Result<Integrations, ClientError> {
    if !caller.has_flag(AccountFlag::Developer) {
        return Err(AccountError::MissingFlag {
            username: caller.username.clone(),
            flag: AccountFlag::Developer,
        }
        .into());
    }
    let token = non_empty_token(caller_token, "forcibly update integrations")?;

    let body = serde_json::to_value(update)
        .map_err(|e| ClientError::encode("integration update", &e))?;
    let path_params = Params::from([("id".to_string(), target_uid.to_string())]);
    let data = client
        .try_call(
            names::MANAGE_INTEGRATIONS_BY_ID,
            &bearer(token),
            &Params::new(),
            &path_params,
            Some(&body),
        )
        .await?;
    integrations_from(names::MANAGE_INTEGRATIONS_BY_ID, data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integrations_are_extracted() {
        let integrations =
            integrations_from("R", json!({"Integrations": {"github": {"login": "x"}}})).unwrap();
        assert_eq!(integrations["github"]["login"], "x");
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let err = non_empty_token(Some(""), "delete account").unwrap_err();
        assert!(err.is_precondition());
        assert!(non_empty_token(None, "delete account").is_err());
        assert_eq!(non_empty_token(Some("t"), "delete account").unwrap(), "t");
    }

    #[test]
    fn test_missing_integrations_is_invalid() {
        assert!(integrations_from("R", json!({"Success": true})).is_err());
        assert!(integrations_from("R", json!({"Integrations": "nope"})).is_err());
        assert!(integrations_from("R", json!([1, 2])).is_err());
    }
}
