#![doc = include_str!("../README.md")]

mod account;
mod client;
mod config;
mod error;
mod http;
pub mod integrations;
mod logging;
mod manifest;
mod request;

pub use account::SproutAccount;
pub use client::SproutClient;
pub use config::{load_config, load_config_from_path, parse_config};
pub use error::ClientError;
pub use http::{bearer, create_client, has_authorization};
pub use logging::LogRelay;
pub use manifest::{CacheStats, RouteCache};
pub use request::{build_query_string, build_request_url, substitute_path_params, Dispatcher, Params};
pub use sprout_types;
pub use sprout_types::{
    Account, AccountFlag, IntegrationUpdate, Integrations, LogLevel, RouteDescriptor, SdkConfig,
};
