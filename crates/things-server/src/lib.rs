//! # Things Server
//!
//! Runs the Things API handlers behind a local HTTP/1 listener. Each
//! request is routed by method and path, converted into an [`ApiEvent`]
//! and run through the same pipeline a deployed function would use.
//!
//! ```text
//! TCP ──► hyper ──► router ──► ApiEvent ──► Pipeline ──► ApiResponse ──► HTTP
//! ```
//!
//! [`ApiEvent`]: things_core::ApiEvent

#![doc(html_root_url = "https://docs.rs/things-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod convert;
mod error;
pub mod router;
mod server;
mod shutdown;

pub use error::ServerError;
pub use router::{route, Route};
pub use server::{LocalServer, DEFAULT_SHUTDOWN_TIMEOUT, ROUTE_NOT_FOUND};
pub use shutdown::{ConnectionGuard, ConnectionTracker, ShutdownSignal};
