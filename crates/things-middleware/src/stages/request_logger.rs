//! Request logging before hook.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware};
use things_core::HandlerError;
use things_telemetry::logging::fields;
use tracing::info;

/// Logs the method, path and raw body of every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

impl RequestLogger {
    /// Creates the hook.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for RequestLogger {
    fn name(&self) -> &'static str {
        "request_logger"
    }

    fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(async move {
            info!(
                { fields::REQUEST_ID } = %ctx.request_id(),
                { fields::FUNCTION } = ctx.invocation().function_name(),
                { fields::METHOD } = ctx.event.method(),
                { fields::PATH } = %ctx.event.raw_path,
                { fields::BODY } = ctx.event.body.as_deref(),
                "Request"
            );
            Ok(())
        })
    }
}
