//! Route manifest models.
//!
//! The Sprout API advertises every callable endpoint in a remote manifest.
//! Descriptors are only ever decoded from that manifest; the SDK never
//! builds one by hand outside of tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Well-known route names the account facade resolves from the manifest.
pub mod names {
    /// Anonymous account lookup by UID (`:id` path parameter).
    pub const FETCH_ACCOUNT_BY_ID: &str = "FetchAccountByID";
    /// Anonymous account lookup by username (`:username` path parameter).
    pub const FETCH_ACCOUNT_BY_USERNAME: &str = "FetchAccountByUsername";
    /// Authenticated lookup of the token owner's account.
    pub const FETCH_MY_ACCOUNT: &str = "FetchMyAccount";
    /// Deletes the token owner's account.
    pub const DELETE_ACCOUNT: &str = "DeleteAccount";
    /// Reads the token owner's integrations.
    pub const GET_ACCOUNT_INTEGRATIONS: &str = "GetAccountIntegrations";
    /// Replaces one service's integration data for the token owner.
    pub const UPDATE_ACCOUNT_INTEGRATIONS: &str = "UpdateAccountIntegrations";
    /// Developer-only overwrite of another account's integrations (`:id`).
    pub const MANAGE_INTEGRATIONS_BY_ID: &str = "ManageIntegrationsByID";
}

/// HTTP method a route must be called with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared body kind of a route's response.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseKind {
    #[default]
    Json,
    Html,
    File,
    Text,
    /// A kind this SDK does not know; the body is still read as JSON
    #[serde(other)]
    Other,
}

/// A single callable endpoint as advertised by the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Route name; filled from the manifest key when the entry omits it
    #[serde(rename = "CommonName", default)]
    pub name: String,
    /// URL template, may contain `:param` placeholders
    #[serde(rename = "URL")]
    pub url: String,
    /// HTTP method
    #[serde(rename = "Method")]
    pub method: HttpMethod,
    /// Human-readable description
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared response body kind
    #[serde(rename = "ResponseType", default)]
    pub response_kind: ResponseKind,
    /// Whether the route needs an `Authorization` header
    #[serde(rename = "Authenticated", default)]
    pub requires_auth: bool,
}

/// Route name → descriptor table, replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RouteManifest {
    routes: HashMap<String, RouteDescriptor>,
}

impl RouteManifest {
    /// Build a manifest, naming any descriptor that arrived without a name
    /// after its key.
    pub fn new(routes: HashMap<String, RouteDescriptor>) -> Self {
        let routes = routes
            .into_iter()
            .map(|(key, mut route)| {
                if route.name.is_empty() {
                    route.name.clone_from(&key);
                }
                (key, route)
            })
            .collect();
        Self { routes }
    }

    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.get(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}
