//! Invocation context types.
//!
//! The [`InvocationContext`] is what the hosting runtime hands to every
//! handler next to the event: who is running, and under which request id.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

/// A unique identifier for each invocation, using UUID v7.
///
/// UUID v7 is time-ordered, which keeps log lines for the same warm
/// environment naturally sorted.
///
/// # Example
///
/// ```
/// use things_core::RequestId;
///
/// let id = RequestId::new();
/// assert_eq!(id.to_string().len(), 36);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Runtime metadata for a single invocation.
///
/// Lives exactly as long as the invocation; never shared between two.
///
/// # Example
///
/// ```
/// use things_core::InvocationContext;
///
/// let ctx = InvocationContext::new("create-thing");
/// assert_eq!(ctx.function_name(), "create-thing");
/// ```
#[derive(Debug, Clone)]
pub struct InvocationContext {
    request_id: RequestId,
    function_name: String,
    started_at: Instant,
}

impl InvocationContext {
    /// Creates a context with a fresh request ID.
    #[must_use]
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            function_name: function_name.into(),
            started_at: Instant::now(),
        }
    }

    /// Replaces the request ID, e.g. with one assigned by the runtime.
    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the name of the function being invoked.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Returns the elapsed time since the invocation started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Creates a context for tests.
    #[must_use]
    pub fn mock() -> Self {
        Self::new("test-function")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_request_id_serializes_transparently() {
        let uuid = Uuid::nil();
        let json = serde_json::to_string(&RequestId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn test_request_id_parses_its_display() {
        let id = RequestId::new();
        assert_eq!(id.to_string().parse::<RequestId>().unwrap(), id);
        assert!("r1".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_with_request_id() {
        let id = RequestId::from_uuid(Uuid::nil());
        let ctx = InvocationContext::new("get-thing").with_request_id(id);
        assert_eq!(ctx.request_id(), id);
        assert_eq!(ctx.function_name(), "get-thing");
    }
}
