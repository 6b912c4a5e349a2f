//! Middleware context types.
//!
//! The [`MiddlewareContext`] is the per-invocation record that flows through
//! the pipeline: hooks and the error interceptor read and mutate it in
//! place, and it is dropped when the invocation ends.

use std::collections::BTreeMap;
use things_core::{ApiEvent, ApiResponse, HandlerError, InvocationContext, RequestId};

/// Context that flows through the middleware pipeline.
///
/// # Example
///
/// ```
/// use things_core::{ApiEvent, ApiResponse, InvocationContext};
/// use things_middleware::MiddlewareContext;
///
/// let mut ctx = MiddlewareContext::new(ApiEvent::new("GET", "/things"), InvocationContext::mock());
/// assert!(ctx.response().is_none());
///
/// ctx.set_response(ApiResponse::new(http::StatusCode::OK));
/// assert_eq!(ctx.response().map(|r| r.status_code), Some(200));
/// ```
#[derive(Debug)]
pub struct MiddlewareContext {
    /// The inbound event. Before hooks may rewrite it.
    pub event: ApiEvent,

    invocation: InvocationContext,

    /// Request headers as received, before normalization.
    raw_headers: Option<BTreeMap<String, String>>,

    /// The response currently attached.
    response: Option<ApiResponse>,

    /// The failure being intercepted, if any.
    error: Option<HandlerError>,
}

impl MiddlewareContext {
    /// Creates a context with no response attached.
    #[must_use]
    pub fn new(event: ApiEvent, invocation: InvocationContext) -> Self {
        Self {
            event,
            invocation,
            raw_headers: None,
            response: None,
            error: None,
        }
    }

    /// Returns the invocation context.
    #[must_use]
    pub fn invocation(&self) -> &InvocationContext {
        &self.invocation
    }

    /// Returns the invocation's request ID.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.invocation.request_id()
    }

    /// Returns the headers as received, if a normalizer has run.
    #[must_use]
    pub fn raw_headers(&self) -> Option<&BTreeMap<String, String>> {
        self.raw_headers.as_ref()
    }

    /// Records the headers as received.
    pub fn set_raw_headers(&mut self, headers: BTreeMap<String, String>) {
        self.raw_headers = Some(headers);
    }

    /// Returns the attached response.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }

    /// Returns the attached response for in-place mutation.
    pub fn response_mut(&mut self) -> Option<&mut ApiResponse> {
        self.response.as_mut()
    }

    /// Attaches a response, replacing any previous one.
    pub fn set_response(&mut self, response: ApiResponse) {
        self.response = Some(response);
    }

    /// Detaches and returns the response.
    pub fn take_response(&mut self) -> Option<ApiResponse> {
        self.response.take()
    }

    /// Returns the failure being intercepted.
    #[must_use]
    pub fn error(&self) -> Option<&HandlerError> {
        self.error.as_ref()
    }

    pub(crate) fn set_error(&mut self, error: HandlerError) {
        self.error = Some(error);
    }

    pub(crate) fn take_error(&mut self) -> Option<HandlerError> {
        self.error.take()
    }

    /// Creates a context for tests.
    #[must_use]
    pub fn mock(event: ApiEvent) -> Self {
        Self::new(event, InvocationContext::mock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = MiddlewareContext::mock(ApiEvent::new("GET", "/things"));
        assert!(ctx.response().is_none());
        assert!(ctx.error().is_none());
        assert!(ctx.raw_headers().is_none());
        assert_eq!(ctx.invocation().function_name(), "test-function");
    }

    #[test]
    fn test_response_mutation_in_place() {
        let mut ctx = MiddlewareContext::mock(ApiEvent::new("GET", "/things"));
        ctx.set_response(ApiResponse::new(http::StatusCode::OK));

        if let Some(response) = ctx.response_mut() {
            response.status_code = 201;
        }

        assert_eq!(ctx.take_response().map(|r| r.status_code), Some(201));
        assert!(ctx.response().is_none());
    }

    #[test]
    fn test_error_attach_and_take() {
        let mut ctx = MiddlewareContext::mock(ApiEvent::new("GET", "/things"));
        ctx.set_error(HandlerError::internal("boom"));
        assert!(ctx.error().is_some());
        assert!(ctx.take_error().is_some());
        assert!(ctx.error().is_none());
    }
}
