//! Standard pipeline stages.
//!
//! Every Things API handler is wrapped with the same stages, in this order:
//!
//! ## Before the handler
//!
//! 1. [`header_normalizer`] - Lowercase request header names
//! 2. [`request_logger`] - Log method, path and body
//!
//! ## After the handler
//!
//! 3. [`json_content_type`] - Default `content-type` to JSON
//! 4. [`response_logger`] - Log status code and body
//!
//! ## On failure
//!
//! - [`error_handler`] - Map the failure to a 400 or 500 response

pub mod error_handler;
pub mod header_normalizer;
pub mod json_content_type;
pub mod request_logger;
pub mod response_logger;

pub use error_handler::ErrorHandler;
pub use header_normalizer::HeaderNormalizer;
pub use json_content_type::JsonContentType;
pub use request_logger::RequestLogger;
pub use response_logger::ResponseLogger;

use crate::middleware::Handler;
use crate::pipeline::Pipeline;

/// Wraps `handler` with the standard stages.
///
/// # Example
///
/// ```
/// use things_core::ApiResponse;
/// use things_middleware::{handler_fn, stages};
///
/// let pipeline = stages::standard(handler_fn(|_event, _ctx| async {
///     Ok(ApiResponse::new(http::StatusCode::OK))
/// }));
///
/// assert_eq!(pipeline.before_names(), ["header_normalizer", "request_logger"]);
/// assert_eq!(pipeline.after_names(), ["json_content_type", "response_logger"]);
/// assert_eq!(pipeline.interceptor_name(), Some("error_handler"));
/// ```
#[must_use]
pub fn standard<H: Handler>(handler: H) -> Pipeline {
    Pipeline::new(handler)
        .before(HeaderNormalizer::new())
        .before(RequestLogger::new())
        .after(JsonContentType::new())
        .after(ResponseLogger::new())
        .on_error(ErrorHandler::new())
}
