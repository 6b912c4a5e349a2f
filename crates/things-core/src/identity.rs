//! Actor identity.
//!
//! Authentication is out of scope, so every write is attributed to a
//! configured placeholder actor.

use serde::{Deserialize, Serialize};

/// Identity recorded as `created_by` / `updated_by`.
///
/// # Example
///
/// ```
/// use things_core::ActorId;
///
/// assert_eq!(ActorId::placeholder().as_str(), "system");
/// assert_eq!(ActorId::new("batch-import").to_string(), "batch-import");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// The identity used while no authentication is wired in.
    pub const PLACEHOLDER: &'static str = "system";

    /// Creates an actor identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the placeholder identity.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(Self::PLACEHOLDER)
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
