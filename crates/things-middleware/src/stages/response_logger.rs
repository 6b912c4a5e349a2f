//! Response logging after hook.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware};
use serde_json::Value;
use things_core::{ApiResponse, HandlerError, RequestId};
use things_telemetry::logging::fields;
use tracing::{info, warn};

/// Logs the status code and body of the attached response.
///
/// The body is logged as parsed JSON when possible and as the raw string
/// otherwise. This hook never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseLogger;

impl ResponseLogger {
    /// Creates the hook.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a response body for logging.
    ///
    /// A missing or empty body is `Null`; a body that is not JSON is kept as
    /// a string.
    #[must_use]
    pub fn parse_body(body: Option<&str>) -> Value {
        match body {
            None | Some("") => Value::Null,
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!({ fields::ERROR } = %e, { fields::BODY } = raw, "Failed to parse response body as JSON");
                Value::String(raw.to_string())
            }),
        }
    }

    fn log(request_id: RequestId, response: &ApiResponse) {
        let body = Self::parse_body(response.body.as_deref());
        info!(
            { fields::REQUEST_ID } = %request_id,
            { fields::STATUS_CODE } = response.status_code,
            { fields::BODY } = %body,
            "Response"
        );
    }
}

impl Middleware for ResponseLogger {
    fn name(&self) -> &'static str {
        "response_logger"
    }

    fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(async move {
            match ctx.response() {
                Some(response) => Self::log(ctx.request_id(), response),
                None => warn!({ fields::REQUEST_ID } = %ctx.request_id(), "Response object is missing"),
            }
            Ok(())
        })
    }
}
