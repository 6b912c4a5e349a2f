//! Typed configuration for the Things API.
//!
//! - TOML and JSON configuration files
//! - The `DB_*` environment variables deployed functions are given
//! - `PREFIX__SECTION__KEY` overrides for every field
//! - Strict parsing (unknown fields fail)
//!
//! # Configuration File Format
//!
//! ```toml
//! [database]
//! cluster_arn = "arn:aws:rds:eu-west-1:123456789012:cluster:things"
//! secret_arn = "arn:aws:secretsmanager:eu-west-1:123456789012:secret:things"
//! name = "things"
//! endpoint = "http://localhost:8081"
//!
//! [actor]
//! placeholder = "system"
//!
//! [server]
//! http_addr = "0.0.0.0:8080"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

#![doc(html_root_url = "https://docs.rs/things-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::ThingsConfig;
pub use error::ConfigError;
pub use loader::{ConfigLoader, DATABASE_ENV_VARS};
pub use schema::{ActorConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use things_telemetry::LogFormat;
