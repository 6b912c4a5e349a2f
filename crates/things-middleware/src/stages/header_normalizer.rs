//! Request header normalization.
//!
//! Header names arrive in whatever case the caller used. This before hook
//! rewrites them to lowercase so handlers and later hooks can look them up
//! with a single spelling. The map as received is kept on the context.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware};
use std::collections::BTreeMap;
use things_core::HandlerError;

/// Lowercases every request header name in place.
///
/// When two spellings collide (`Accept` and `accept`), the value of the one
/// that sorts last wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderNormalizer;

impl HeaderNormalizer {
    /// Creates the hook.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns `headers` with every name lowercased.
    #[must_use]
    pub fn normalize(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
            .collect()
    }
}

impl Middleware for HeaderNormalizer {
    fn name(&self) -> &'static str {
        "header_normalizer"
    }

    fn process<'a>(&'a self, ctx: &'a mut MiddlewareContext) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(async move {
            let normalized = Self::normalize(&ctx.event.headers);
            let raw = std::mem::replace(&mut ctx.event.headers, normalized);
            ctx.set_raw_headers(raw);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use things_core::ApiEvent;

    #[tokio::test]
    async fn test_lowercases_names_and_keeps_raw() {
        let event = ApiEvent::new("GET", "/things")
            .with_header("Content-Type", "application/json")
            .with_header("X-Custom-Header", "value");
        let mut ctx = MiddlewareContext::mock(event);

        HeaderNormalizer::new().process(&mut ctx).await.unwrap();

        assert_eq!(ctx.event.headers.get("content-type").unwrap(), "application/json");
        assert_eq!(ctx.event.headers.get("x-custom-header").unwrap(), "value");
        assert!(!ctx.event.headers.contains_key("Content-Type"));
        assert!(ctx.raw_headers().unwrap().contains_key("X-Custom-Header"));
    }

    #[test]
    fn test_collision_last_sorted_wins() {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "text/html".to_string());
        headers.insert("accept".to_string(), "application/json".to_string());

        let normalized = HeaderNormalizer::normalize(&headers);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn test_values_untouched() {
        let mut headers = BTreeMap::new();
        headers.insert("X-Mixed".to_string(), "KeepMe".to_string());
        assert_eq!(HeaderNormalizer::normalize(&headers).get("x-mixed").unwrap(), "KeepMe");
    }
}
