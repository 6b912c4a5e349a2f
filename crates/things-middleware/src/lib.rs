//! # Things Middleware
//!
//! The pipeline every Things API handler runs behind.
//!
//! ## Pipeline
//!
//! ```text
//! Event → HeaderNormalizer → RequestLogger → Handler
//!                                               ↓
//! Result ← ResponseLogger ← JsonContentType ←───┘
//!
//! (failure in a before hook or the handler) → ErrorHandler → Err(failure)
//! ```
//!
//! A [`Pipeline`] holds ordered before hooks, ordered after hooks, one
//! [`ErrorInterceptor`] and the wrapped [`Handler`]. Hooks share the
//! [`Middleware`] trait and read or mutate the [`MiddlewareContext`].
//!
//! When the handler fails, the interceptor attaches a response and the
//! original failure is still returned to the caller inside an
//! [`InvocationFailure`], alongside that response.
//!
//! ## Example
//!
//! ```
//! use things_core::{ApiEvent, ApiResponse, InvocationContext};
//! use things_middleware::{handler_fn, stages};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = stages::standard(handler_fn(|_event, _ctx| async {
//!     Ok(ApiResponse::new(http::StatusCode::OK))
//! }));
//!
//! let response = pipeline
//!     .invoke(ApiEvent::new("GET", "/things"), InvocationContext::mock())
//!     .await
//!     .unwrap();
//! assert_eq!(response.header("content-type"), Some("application/json"));
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/things-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod stages;

pub use context::MiddlewareContext;
pub use middleware::{handler_fn, BoxFuture, ErrorInterceptor, FnHandler, FnMiddleware, Handler, Middleware};
pub use pipeline::{BoxedMiddleware, InvocationFailure, Pipeline};
pub use stages::{ErrorHandler, HeaderNormalizer, JsonContentType, RequestLogger, ResponseLogger};
