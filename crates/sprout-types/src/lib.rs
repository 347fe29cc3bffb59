//! # Sprout Types
//!
//! Route, account, logging and configuration models for the Sprout SDK.
//!
//! This crate provides the foundational type system shared by the client:
//!
//! - **`error`** - Typed errors for local precondition and configuration failures
//! - **`models`** - Domain models (RouteDescriptor, Account, LogEntry, SdkConfig)
//!
//! ## Architecture Role
//!
//! `sprout-types` sits at the bottom of the dependency graph and performs no I/O:
//!
//! ```text
//!      sprout-types (this crate)
//!              │
//!              ▼
//!        sprout-client
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde, using the service's PascalCase wire names
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{AccountError, ConfigError};

// Re-export core model types
pub use models::{
    Account, AccountFlag, Document, GenericAccount, HttpMethod, IntegrationUpdate, Integrations,
    LogEntry, LogLevel, Microservices, PasswordRecord, PublicAccount, ResponseKind,
    ResponsePolicy, ResponseUnwrap, RouteDescriptor, RouteManifest, SdkConfig, Settings,
    Verification,
};
