use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use sprout_types::{LogLevel, SdkConfig};

use crate::config::load_config;
use crate::error::ClientError;
use crate::http::create_client;
use crate::logging::LogRelay;
use crate::manifest::RouteCache;
use crate::request::{Dispatcher, Params};

/// Entry point of the SDK.
///
/// Owns the manifest cache, so build it once at process start and share it
/// (by reference or `Arc`) with everything that talks to Sprout.
pub struct SproutClient {
    config: SdkConfig,
    http: Client,
    routes: RouteCache,
    dispatcher: Dispatcher,
    relay: LogRelay,
}

impl SproutClient {
    pub fn new(config: SdkConfig) -> Result<Self, ClientError> {
        let http = create_client(config.request_timeout_secs)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Build a client on top of an existing `reqwest::Client`.
    pub fn with_http_client(config: SdkConfig, http: Client) -> Self {
        let routes = RouteCache::new(
            http.clone(),
            config.manifest_url.clone(),
            Duration::from_millis(config.manifest_ttl_ms),
        );
        let dispatcher = Dispatcher::new(http.clone(), config.response.clone());
        let relay = LogRelay::new(http.clone(), config.logging_relay());
        Self { config, http, routes, dispatcher, relay }
    }

    /// Load the embedded configuration (plus environment overrides) and build a client.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(load_config()?)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Shared transport used by every component.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn routes(&self) -> &RouteCache {
        &self.routes
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn relay(&self) -> &LogRelay {
        &self.relay
    }

    /// Resolve `route_name` from the manifest and dispatch it.
    pub async fn call(
        &self,
        route_name: &str,
        headers: &Params,
        query: &Params,
        path_params: &Params,
        body: Option<&Value>,
    ) -> Option<Value> {
        let route = self.routes.route(route_name).await?;
        self.dispatcher.dispatch(&route, headers, query, path_params, body).await
    }

    pub async fn try_call(
        &self,
        route_name: &str,
        headers: &Params,
        query: &Params,
        path_params: &Params,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let route = self.routes.try_route(route_name).await?;
        self.dispatcher.try_dispatch(&route, headers, query, path_params, body).await
    }

    /// Send an entry to the logging relay on behalf of `service_uid`.
    pub async fn log(&self, service_uid: &str, level: LogLevel, title: &str, content: &str) -> bool {
        self.relay.log(service_uid, level, title, content).await
    }
}
