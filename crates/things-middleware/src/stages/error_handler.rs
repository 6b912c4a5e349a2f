//! The generic error interceptor.
//!
//! Classifies a failure that escaped a handler by its [`HandlerError`] tag:
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `Validation` | 400 | `{"error": "Validation error", "details": [...]}` |
//! | `Internal` | 500 | `{"error": "Internal server error", "message": <error message>}` |
//! | `Panic` | 500 | `{"error": "Internal server error", "message": "An unexpected error occurred."}` |
//!
//! Handlers answer their domain errors themselves; this is the last-resort
//! path for anything they did not.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, ErrorInterceptor};
use http::StatusCode;
use serde_json::json;
use things_core::{ApiResponse, HandlerError};
use things_telemetry::logging::fields;
use tracing::error;

/// Message used when the failure carries no usable message.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred.";

/// Maps [`HandlerError`] variants to HTTP responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    /// Creates the interceptor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the response for `err`.
    #[must_use]
    pub fn classify(err: &HandlerError) -> ApiResponse {
        let (status, body) = match err {
            HandlerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation error",
                    "details": errors.messages(),
                }),
            ),
            HandlerError::Internal(source) => {
                let message = source.to_string();
                let message = if message.is_empty() {
                    FALLBACK_MESSAGE.to_string()
                } else {
                    message
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "message": message,
                    }),
                )
            }
            HandlerError::Panic(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal server error",
                    "message": FALLBACK_MESSAGE,
                }),
            ),
        };

        ApiResponse {
            body: Some(body.to_string()),
            ..ApiResponse::new(status)
        }
    }
}

impl ErrorInterceptor for ErrorHandler {
    fn name(&self) -> &'static str {
        "error_handler"
    }

    fn intercept<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let Some(err) = ctx.error() else {
                return;
            };

            error!(
                { fields::REQUEST_ID } = %ctx.request_id(),
                { fields::ERROR } = %err,
                existing_response = ?ctx.response(),
                "Error detected in error handler"
            );

            let response = Self::classify(err);
            ctx.set_response(response);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use things_core::{ApiEvent, ValidationErrors};

    fn body(response: &ApiResponse) -> serde_json::Value {
        serde_json::from_str(response.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_validation_maps_to_400_with_details() {
        let errors: ValidationErrors = ["Name is required", "Description must be a string"]
            .into_iter()
            .collect();
        let response = ErrorHandler::classify(&HandlerError::Validation(errors));

        assert_eq!(response.status_code, 400);
        assert_eq!(
            body(&response),
            json!({
                "error": "Validation error",
                "details": ["Name is required", "Description must be a string"]
            })
        );
    }

    #[test]
    fn test_internal_maps_to_500_with_message() {
        let response = ErrorHandler::classify(&HandlerError::internal("connection refused"));

        assert_eq!(response.status_code, 500);
        assert_eq!(
            body(&response),
            json!({"error": "Internal server error", "message": "connection refused"})
        );
    }

    #[test]
    fn test_empty_message_falls_back() {
        let response = ErrorHandler::classify(&HandlerError::internal(""));
        assert_eq!(body(&response)["message"], FALLBACK_MESSAGE);
    }

    #[test]
    fn test_panic_uses_fallback_message() {
        let response = ErrorHandler::classify(&HandlerError::Panic("index out of bounds".into()));

        assert_eq!(response.status_code, 500);
        assert_eq!(body(&response)["message"], FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_intercept_replaces_existing_response() {
        let mut ctx = MiddlewareContext::mock(ApiEvent::new("GET", "/things"));
        ctx.set_response(ApiResponse::new(StatusCode::OK));
        ctx.set_error(HandlerError::internal("late failure"));

        ErrorHandler::new().intercept(&mut ctx).await;

        assert_eq!(ctx.response().map(|r| r.status_code), Some(500));
        assert!(ctx.error().is_some());
    }

    #[tokio::test]
    async fn test_intercept_without_error_is_noop() {
        let mut ctx = MiddlewareContext::mock(ApiEvent::new("GET", "/things"));
        ErrorHandler::new().intercept(&mut ctx).await;
        assert!(ctx.response().is_none());
    }
}
