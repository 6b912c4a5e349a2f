//! Error types for the Things API.
//!
//! Two families live here:
//!
//! - [`ThingError`] is the domain taxonomy. Handlers raise and answer these
//!   locally; each variant knows its stable code, HTTP status and message.
//! - [`HandlerError`] is what escapes a handler entirely. Only the pipeline's
//!   error interceptor ever sees it, and it inspects the variant tag once.
//!
//! | Code | Status | Cause |
//! |---|---|---|
//! | `INVALID_JSON` | 400 | Body present but not parseable |
//! | `VALIDATION_ERROR` | 400 | Body violates the operation's field schema |
//! | `MISSING_ID` | 400 | Path identifier absent |
//! | `INVALID_ID` | 400 | Path identifier not canonical-UUID-shaped |
//! | `NO_FIELDS` | 400 | Update without any recognized field |
//! | `NOT_FOUND` | 404 | No row for the identifier |
//! | `INTERNAL_ERROR` | 500 | Store fault or missing row where one was expected |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes carried in failure envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body present but not parseable as JSON.
    InvalidJson,
    /// Request body violates the operation's schema.
    ValidationError,
    /// Path identifier absent.
    MissingId,
    /// Path identifier not a canonical UUID.
    InvalidId,
    /// Update request supplied no recognized field.
    NoFields,
    /// No resource matches the identifier.
    NotFound,
    /// Store fault or unexpected empty store result.
    InternalError,
}

impl ErrorCode {
    /// Returns the wire spelling of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::MissingId => "MISSING_ID",
            Self::InvalidId => "INVALID_ID",
            Self::NoFields => "NO_FIELDS",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status this code is answered with.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidJson
            | Self::ValidationError
            | Self::MissingId
            | Self::InvalidId
            | Self::NoFields => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered collection of schema violation messages.
///
/// Validation never stops at the first violation, so this always holds
/// every message in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Returns true if no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the messages in recorded order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Returns `Ok(value)` when empty, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<S: Into<String>> FromIterator<S> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Domain failures answered locally by a resource handler.
///
/// # Example
///
/// ```
/// use things_core::{ErrorCode, ThingError};
///
/// let err = ThingError::not_found("550e8400-e29b-41d4-a716-446655440000");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.status_code().as_u16(), 404);
/// assert_eq!(err.to_string(), "Thing not found");
/// ```
#[derive(Error, Debug)]
pub enum ThingError {
    /// Body is not parseable JSON.
    #[error("Request body must be valid JSON")]
    InvalidJson {
        /// Why parsing failed (logged, never sent to clients).
        reason: String,
    },

    /// Body failed schema validation.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Path identifier absent.
    #[error("Thing ID is required")]
    MissingId,

    /// Path identifier present but not a canonical UUID.
    #[error("Invalid thing ID format")]
    InvalidId {
        /// The rejected identifier.
        id: String,
    },

    /// Update body carried no recognized field.
    #[error("At least one field must be provided for update")]
    NoFields,

    /// No row matches the identifier.
    #[error("Thing not found")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// Store fault, or a store call that returned nothing where a row was
    /// expected.
    #[error("An unexpected error occurred")]
    Internal {
        /// The underlying failure (never exposed to clients).
        #[source]
        source: anyhow::Error,
    },
}

impl ThingError {
    /// Creates an invalid JSON error.
    #[must_use]
    pub fn invalid_json(reason: impl Into<String>) -> Self {
        Self::InvalidJson {
            reason: reason.into(),
        }
    }

    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an internal error wrapping the underlying failure.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            source: source.into(),
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidJson { .. } => ErrorCode::InvalidJson,
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::MissingId => ErrorCode::MissingId,
            Self::InvalidId { .. } => ErrorCode::InvalidId,
            Self::NoFields => ErrorCode::NoFields,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.code().status_code()
    }

    /// Returns the optional `details` member of the error body.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ThingError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// A failure that escaped a handler and reached the pipeline.
///
/// The variant is the discriminator the error interceptor classifies on.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A schema validation failure that was not answered locally.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Any other error-shaped failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    /// A failure that carried no error value (the handler panicked).
    #[error("handler panicked: {0}")]
    Panic(String),
}

impl HandlerError {
    /// Creates an internal failure from a message.
    #[must_use]
    pub fn internal(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self::Internal(anyhow::Error::msg(message))
    }
}

impl From<ValidationErrors> for HandlerError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}
