//! Store error types.

use thiserror::Error;

/// Errors raised by a statement executor.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a usable reply.
    #[error("statement transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-success status.
    #[error("statement rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status returned by the collaborator.
        status: u16,
        /// Reply body, as text.
        message: String,
    },

    /// A returned row does not have the expected column layout.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error from a message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Creates a malformed record error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord(message.into())
    }
}
