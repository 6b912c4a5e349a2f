//! Structured logging for the Things API.
//!
//! Every Things function logs through `tracing`. This crate installs the
//! subscriber once per process:
//!
//! - JSON lines in production, one object per event
//! - Pretty multi-line output for local development
//! - Level filtering through an `EnvFilter` directive string
//!
//! # Example
//!
//! ```rust,ignore
//! use things_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//!
//! tracing::info!(method = "POST", path = "/things", "Incoming request");
//! ```

#![doc(html_root_url = "https://docs.rs/things-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
