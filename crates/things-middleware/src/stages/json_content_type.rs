//! Default JSON content type.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware};
use things_core::{ApiResponse, HandlerError, APPLICATION_JSON, CONTENT_TYPE};

/// The capitalized spelling also honoured when checking for an existing
/// content type.
pub const CONTENT_TYPE_CAPITALIZED: &str = "Content-Type";

/// After hook that adds `content-type: application/json` to the response
/// unless one is already present under `content-type` or `Content-Type`.
///
/// An existing value is never overwritten or duplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentType;

impl JsonContentType {
    /// Creates the hook.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies the default to `response`.
    pub fn apply(response: &mut ApiResponse) {
        let headers = response.headers.get_or_insert_with(Default::default);
        if !headers.contains_key(CONTENT_TYPE) && !headers.contains_key(CONTENT_TYPE_CAPITALIZED) {
            headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        }
    }
}

impl Middleware for JsonContentType {
    fn name(&self) -> &'static str {
        "json_content_type"
    }

    fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(async move {
            if let Some(response) = ctx.response_mut() {
                Self::apply(response);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_adds_lowercase_default() {
        let mut response = ApiResponse::new(StatusCode::OK);
        JsonContentType::apply(&mut response);

        let headers = response.headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_keeps_lowercase_value() {
        let mut response = ApiResponse::new(StatusCode::OK).with_header("content-type", "text/plain");
        JsonContentType::apply(&mut response);

        let headers = response.headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn test_keeps_capitalized_value_without_duplicate() {
        let mut response = ApiResponse::new(StatusCode::OK).with_header("Content-Type", "text/html");
        JsonContentType::apply(&mut response);

        let headers = response.headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type").unwrap(), "text/html");
    }

    #[test]
    fn test_other_headers_preserved() {
        let mut response = ApiResponse::new(StatusCode::OK).with_header("x-trace", "abc");
        JsonContentType::apply(&mut response);

        let headers = response.headers.unwrap();
        assert_eq!(headers.get("x-trace").unwrap(), "abc");
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_no_response_is_noop() {
        let mut ctx = MiddlewareContext::mock(things_core::ApiEvent::new("GET", "/"));
        JsonContentType::new().process(&mut ctx).await.unwrap();
        assert!(ctx.response().is_none());
    }
}
