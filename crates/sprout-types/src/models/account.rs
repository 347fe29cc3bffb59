//! Account model and its public/generic projections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Open, server-defined key/value document.
pub type Document = Map<String, Value>;

/// Per-service integration data, keyed by service name.
pub type Integrations = Document;

/// Free-form account settings.
pub type Settings = Document;

/// Capability flags carried by an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountFlag {
    Administrator,
    Developer,
    /// Any flag this SDK version does not know about
    #[serde(other)]
    Unknown,
}

/// Verification state of an account's contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Verification {
    #[serde(default)]
    pub email: bool,
}

/// Stored password hash and salt. Only present on privileged loads.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordRecord {
    pub hash: String,
    pub salt: String,
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRecord")
            .field("hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

/// Account data as served by the Sprout API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    /// Unique identifier for the account
    #[serde(rename = "UID", default)]
    pub uid: String,
    /// Public username
    pub username: String,
    /// Email address, hidden on generic loads
    #[serde(default)]
    pub email: Option<String>,
    /// Optional avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Capability flags
    #[serde(default)]
    pub flags: BTreeSet<AccountFlag>,
    /// Account settings
    #[serde(default)]
    pub settings: Settings,
    /// Third-party service integrations
    #[serde(default)]
    pub integrations: Integrations,
    /// Verification state
    #[serde(default)]
    pub verification: Verification,
    /// Credential material, present only on privileged loads
    #[serde(default)]
    pub password: Option<PasswordRecord>,
}

impl Account {
    /// Create a bare account with the given UID and username.
    pub fn new(uid: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            username: username.into(),
            email: None,
            avatar: None,
            flags: BTreeSet::new(),
            settings: Settings::new(),
            integrations: Integrations::new(),
            verification: Verification::default(),
            password: None,
        }
    }

    pub fn has_flag(&self, flag: AccountFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Projection safe to show to the account owner (credentials stripped).
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            uid: self.uid.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            flags: self.flags.clone(),
            settings: self.settings.clone(),
            integrations: self.integrations.clone(),
            verification: self.verification.clone(),
            public: true,
        }
    }

    /// Projection safe to show to third parties (personal data stripped).
    pub fn to_generic(&self) -> GenericAccount {
        GenericAccount {
            uid: self.uid.clone(),
            username: self.username.clone(),
            avatar: self.avatar.clone(),
            flags: self.flags.clone(),
            verification: self.verification.clone(),
            generic: true,
        }
    }
}

/// Account view without credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccount {
    #[serde(rename = "UID")]
    pub uid: String,
    pub username: String,
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub flags: BTreeSet<AccountFlag>,
    pub settings: Settings,
    pub integrations: Integrations,
    pub verification: Verification,
    pub public: bool,
}

/// Account view without credentials, email, settings or integrations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GenericAccount {
    #[serde(rename = "UID")]
    pub uid: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub flags: BTreeSet<AccountFlag>,
    pub verification: Verification,
    pub generic: bool,
}

/// Request body for integration updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct IntegrationUpdate {
    /// Service whose integration data is replaced
    pub service: String,
    /// New integration data for that service
    pub integrations: Value,
}

impl IntegrationUpdate {
    pub fn new(service: impl Into<String>, integrations: Value) -> Self {
        Self { service: service.into(), integrations }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn privileged_account() -> Account {
        serde_json::from_value(json!({
            "UID": "acc-1",
            "Username": "fern",
            "Email": "fern@example.com",
            "Flags": ["Developer"],
            "Settings": {"theme": "dark"},
            "Integrations": {"github": {"login": "fern"}},
            "Verification": {"Email": true},
            "Password": {"Hash": "h", "Salt": "s"}
        }))
        .unwrap()
    }

    #[test]
    fn test_generic_payload_fills_defaults() {
        let account: Account = serde_json::from_value(json!({
            "UID": "acc-2",
            "Username": "moss",
            "Flags": ["Administrator", "Gardener"]
        }))
        .unwrap();

        assert_eq!(account.email, None);
        assert_eq!(account.password, None);
        assert!(account.settings.is_empty());
        assert!(account.integrations.is_empty());
        assert!(!account.verification.email);
        assert!(account.has_flag(AccountFlag::Administrator));
        assert!(account.has_flag(AccountFlag::Unknown));
        assert!(!account.has_flag(AccountFlag::Developer));
    }

    #[test]
    fn test_public_view_drops_password() {
        let public = serde_json::to_value(privileged_account().to_public()).unwrap();
        let obj = public.as_object().unwrap();

        assert!(!obj.contains_key("Password"));
        assert_eq!(obj["Email"], "fern@example.com");
        assert_eq!(obj["Settings"]["theme"], "dark");
        assert_eq!(obj["Integrations"]["github"]["login"], "fern");
        assert_eq!(obj["Public"], true);
    }

    #[test]
    fn test_generic_view_drops_personal_fields() {
        let generic = serde_json::to_value(privileged_account().to_generic()).unwrap();
        let obj = generic.as_object().unwrap();

        for key in ["Password", "Email", "Settings", "Integrations"] {
            assert!(!obj.contains_key(key), "generic view leaked {key}");
        }
        assert_eq!(obj["UID"], "acc-1");
        assert_eq!(obj["Username"], "fern");
        assert_eq!(obj["Flags"], json!(["Developer"]));
        assert_eq!(obj["Generic"], true);
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let rendered = format!("{:?}", privileged_account());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hash: \"h\""));
        assert!(!rendered.contains("salt: \"s\""));
    }

    #[test]
    fn test_integration_update_wire_shape() {
        let body = serde_json::to_value(IntegrationUpdate::new("github", json!({"login": "x"})))
            .unwrap();
        assert_eq!(body, json!({"Service": "github", "Integrations": {"login": "x"}}));
    }
}
