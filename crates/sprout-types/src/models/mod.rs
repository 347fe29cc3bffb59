//! Core domain models for the Sprout SDK.
//!
//! Everything here mirrors a shape served by (or sent to) the Sprout services.

mod account;
mod config;
mod log;
pub mod route;

// Re-export all models
pub use account::{
    Account, AccountFlag, Document, GenericAccount, IntegrationUpdate, Integrations,
    PasswordRecord, PublicAccount, Settings, Verification,
};
pub use config::{
    Microservices, ResponsePolicy, ResponseUnwrap, SdkConfig, DEFAULT_MANIFEST_TTL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use log::{LogEntry, LogLevel};
pub use route::{HttpMethod, ResponseKind, RouteDescriptor, RouteManifest};
