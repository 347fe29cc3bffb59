//! Account facade.
//!
//! A [`SproutAccount`] is loaded one of three ways and never changes origin
//! afterwards:
//!
//! - [`SproutAccount::from_id`] / [`SproutAccount::from_username`]: anonymous
//!   lookups returning the generic view, with no token.
//! - [`SproutAccount::from_token`]: authenticated lookup; the account keeps
//!   the token and is the only kind allowed to delete itself or touch its
//!   integrations.
//!
//! A missing token is a capability restriction, not an error state: each
//! privileged method checks for it before anything goes over the wire.

use std::fmt;

use serde_json::Value;
use sprout_types::models::route::names;
use sprout_types::{Account, GenericAccount, IntegrationUpdate, Integrations, PublicAccount};

use crate::client::SproutClient;
use crate::error::{collapse, ClientError};
use crate::http::bearer;
use crate::integrations::{
    non_empty_token, try_forcibly_update_integrations, try_get_account_integrations,
    try_update_account_integrations,
};
use crate::request::Params;

/// An account loaded from the Sprout API.
#[derive(Clone, PartialEq, Eq)]
pub struct SproutAccount {
    account: Account,
    token: Option<String>,
}

impl fmt::Debug for SproutAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SproutAccount")
            .field("account", &self.account)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Decode the `Account` object of a lookup response.
fn account_from(context: &str, data: Value) -> Result<Account, ClientError> {
    let raw = match data {
        Value::Object(mut obj) => obj.remove("Account").filter(|v| !v.is_null()),
        _ => None,
    }
    .ok_or_else(|| ClientError::invalid_response(context, "missing Account object"))?;
    serde_json::from_value(raw).map_err(|e| ClientError::decode(context, &e))
}

impl SproutAccount {
    /// Wrap already-decoded account data. An empty token is treated as none.
    pub fn new(account: Account, token: Option<String>) -> Self {
        Self { account, token: token.filter(|t| !t.is_empty()) }
    }

    /// Fetch the generic view of an account by its UID.
    pub async fn from_id(client: &SproutClient, uid: &str) -> Option<Self> {
        collapse("fetch account by id", Self::try_from_id(client, uid).await)
    }

    pub async fn try_from_id(client: &SproutClient, uid: &str) -> Result<Self, ClientError> {
        let path_params = Params::from([("id".to_string(), uid.to_string())]);
        let data = client
            .try_call(names::FETCH_ACCOUNT_BY_ID, &Params::new(), &Params::new(), &path_params, None)
            .await?;
        let mut account = account_from(names::FETCH_ACCOUNT_BY_ID, data)?;
        account.uid = uid.to_string();
        Ok(Self::new(account, None))
    }

    /// Fetch the generic view of an account by its username.
    pub async fn from_username(client: &SproutClient, username: &str) -> Option<Self> {
        collapse("fetch account by username", Self::try_from_username(client, username).await)
    }

    pub async fn try_from_username(
        client: &SproutClient,
        username: &str,
    ) -> Result<Self, ClientError> {
        let path_params = Params::from([("username".to_string(), username.to_string())]);
        let data = client
            .try_call(
                names::FETCH_ACCOUNT_BY_USERNAME,
                &Params::new(),
                &Params::new(),
                &path_params,
                None,
            )
            .await?;
        let account = account_from(names::FETCH_ACCOUNT_BY_USERNAME, data)?;
        Ok(Self::new(account, None))
    }

    /// Fetch the token owner's account. The result keeps the token and may
    /// call the privileged methods.
    pub async fn from_token(client: &SproutClient, token: &str) -> Option<Self> {
        collapse("fetch account by token", Self::try_from_token(client, token).await)
    }

    pub async fn try_from_token(client: &SproutClient, token: &str) -> Result<Self, ClientError> {
        let token = non_empty_token(Some(token), "fetch account by token")?;
        let data = client
            .try_call(names::FETCH_MY_ACCOUNT, &bearer(token), &Params::new(), &Params::new(), None)
            .await?;
        let account = account_from(names::FETCH_MY_ACCOUNT, data)?;
        Ok(Self::new(account, Some(token.to_string())))
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn into_account(self) -> Account {
        self.account
    }

    pub fn uid(&self) -> &str {
        &self.account.uid
    }

    pub fn username(&self) -> &str {
        &self.account.username
    }

    pub fn integrations(&self) -> &Integrations {
        &self.account.integrations
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn require_token(&self, operation: &str) -> Result<&str, ClientError> {
        non_empty_token(self.token(), operation)
    }

    /// Delete the account on the server. Local state is left as is; drop the
    /// instance afterwards.
    pub async fn delete(&self, client: &SproutClient) -> bool {
        collapse("delete account", self.try_delete(client).await).is_some()
    }

    pub async fn try_delete(&self, client: &SproutClient) -> Result<(), ClientError> {
        let token = self.require_token("delete account")?;
        let data = client
            .try_call(names::DELETE_ACCOUNT, &bearer(token), &Params::new(), &Params::new(), None)
            .await?;
        if data.get("Success").and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err(ClientError::invalid_response(names::DELETE_ACCOUNT, "Success was not true"))
        }
    }

    /// Fetch the latest integrations and store them on the account.
    pub async fn get_integrations(&mut self, client: &SproutClient) -> Option<Integrations> {
        collapse("get integrations", self.try_get_integrations(client).await)
    }

    pub async fn try_get_integrations(
        &mut self,
        client: &SproutClient,
    ) -> Result<Integrations, ClientError> {
        let token = self.require_token("get integrations")?;
        let integrations = try_get_account_integrations(client, token).await?;
        self.account.integrations = integrations.clone();
        Ok(integrations)
    }

    /// Replace `service`'s integration data. On success the account's
    /// integrations become the server's updated copy.
    pub async fn update_integrations(
        &mut self,
        client: &SproutClient,
        service: &str,
        data: Value,
    ) -> bool {
        collapse("update integrations", self.try_update_integrations(client, service, data).await)
            .is_some()
    }

    pub async fn try_update_integrations(
        &mut self,
        client: &SproutClient,
        service: &str,
        data: Value,
    ) -> Result<Integrations, ClientError> {
        let token = self.require_token("update integrations")?;
        let integrations = try_update_account_integrations(client, service, data, token).await?;
        self.account.integrations = integrations.clone();
        Ok(integrations)
    }

    /// Overwrite another account's integrations. Requires the `Developer`
    /// flag and a token on this account. Returns the target's new integrations.
    pub async fn forcibly_update_integrations(
        &self,
        client: &SproutClient,
        target_uid: &str,
        update: &IntegrationUpdate,
    ) -> Option<Integrations> {
        collapse(
            "forcibly update integrations",
            try_forcibly_update_integrations(
                client,
                &self.account,
                self.token(),
                target_uid,
                update,
            )
            .await,
        )
    }

    /// View safe to show to the account owner.
    pub fn to_public(&self) -> PublicAccount {
        self.account.to_public()
    }

    /// View safe to show to anyone.
    pub fn to_generic(&self) -> GenericAccount {
        self.account.to_generic()
    }
}
