//! Route manifest cache.
//!
//! Fetches the route table from the manifest endpoint and keeps it for the
//! configured lifetime. The lock is never held across the network call, so
//! two callers racing past an expired entry each fetch and the last write
//! wins. The manifest is assumed stable enough for that to be harmless.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use sprout_types::{RouteDescriptor, RouteManifest};
use tokio::sync::RwLock;

use crate::error::ClientError;

#[derive(Deserialize)]
struct ManifestEnvelope {
    #[serde(rename = "Data")]
    data: ManifestData,
}

#[derive(Deserialize)]
struct ManifestData {
    #[serde(rename = "Routes")]
    routes: HashMap<String, Value>,
}

struct CachedManifest {
    manifest: Arc<RouteManifest>,
    fetched_at: Instant,
}

/// Cache counters for monitoring.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered from a fresh cache entry
    pub hits: u64,
    /// Calls that went to the network
    pub misses: u64,
    /// Network fetches that failed
    pub failures: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

/// Time-bounded cache of the remote route manifest.
pub struct RouteCache {
    http: Client,
    manifest_url: String,
    ttl: Duration,
    entry: RwLock<Option<CachedManifest>>,
    counters: Counters,
}

impl RouteCache {
    pub fn new(http: Client, manifest_url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            http,
            manifest_url: manifest_url.into(),
            ttl,
            entry: RwLock::new(None),
            counters: Counters::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current manifest, or `None` when it cannot be fetched.
    pub async fn fetch(&self) -> Option<Arc<RouteManifest>> {
        match self.try_fetch().await {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::error!(url = %self.manifest_url, error = %e, "Failed to fetch route manifest");
                None
            },
        }
    }

    /// Current manifest, refreshing it when missing or older than the TTL.
    ///
    /// A failed refresh leaves any previous entry untouched and its age
    /// unchanged, so the next call tries the network again.
    pub async fn try_fetch(&self) -> Result<Arc<RouteManifest>, ClientError> {
        if let Some(manifest) = self.fresh().await {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(routes = manifest.len(), "Route manifest cache hit");
            return Ok(manifest);
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let manifest = match self.download().await {
            Ok(manifest) => Arc::new(manifest),
            Err(e) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            },
        };

        *self.entry.write().await =
            Some(CachedManifest { manifest: Arc::clone(&manifest), fetched_at: Instant::now() });
        tracing::info!(routes = manifest.len(), "Route manifest refreshed");
        Ok(manifest)
    }

    /// Resolve a single route by name.
    pub async fn route(&self, name: &str) -> Option<RouteDescriptor> {
        match self.try_route(name).await {
            Ok(route) => Some(route),
            Err(e) => {
                tracing::error!(route = name, error = %e, "Failed to resolve route");
                None
            },
        }
    }

    pub async fn try_route(&self, name: &str) -> Result<RouteDescriptor, ClientError> {
        let manifest = self
            .try_fetch()
            .await
            .map_err(|e| ClientError::ManifestUnavailable { source: Box::new(e) })?;
        manifest
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::RouteNotFound { name: name.to_string() })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    async fn fresh(&self) -> Option<Arc<RouteManifest>> {
        let guard = self.entry.read().await;
        let cached = guard.as_ref()?;
        (cached.fetched_at.elapsed() < self.ttl).then(|| Arc::clone(&cached.manifest))
    }

    async fn download(&self) -> Result<RouteManifest, ClientError> {
        let resp = self.http.get(&self.manifest_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                route: "route manifest".to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        let envelope: ManifestEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::decode("route manifest", &e))?;
        Ok(RouteManifest::new(decode_routes(envelope.data.routes)))
    }
}

/// Decode each route on its own; entries this SDK cannot dispatch (for
/// example an unsupported method) are skipped instead of failing the manifest.
fn decode_routes(raw: HashMap<String, Value>) -> HashMap<String, RouteDescriptor> {
    raw.into_iter()
        .filter_map(|(name, value)| match serde_json::from_value::<RouteDescriptor>(value) {
            Ok(route) => Some((name, route)),
            Err(e) => {
                tracing::warn!(route = %name, error = %e, "Skipping unsupported manifest route");
                None
            },
        })
        .collect()
}
