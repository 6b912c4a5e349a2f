//! The API envelope.
//!
//! Every handler body is one of exactly two shapes:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "Thing not found" } }
//! ```

use crate::error::ThingError;
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Structured error object of a failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details (e.g. validation messages).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&ThingError> for ErrorBody {
    fn from(err: &ThingError) -> Self {
        Self {
            code: err.code().as_str().to_string(),
            message: err.to_string(),
            details: err.details(),
        }
    }
}

/// Discriminated success/failure wrapper.
///
/// # Example
///
/// ```
/// use things_core::Envelope;
///
/// let json = serde_json::to_value(Envelope::success(vec![1, 2])).unwrap();
/// assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEnvelope<T>", bound(deserialize = "T: DeserializeOwned"))]
pub enum Envelope<T> {
    /// The operation succeeded.
    Success(T),
    /// The operation failed.
    Failure(ErrorBody),
}

impl<T> Envelope<T> {
    /// Wraps a successful result.
    pub const fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// Returns true for the success variant.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the payload of a success envelope.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error object of a failure envelope.
    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Self::Success(_) => None,
            Self::Failure(body) => Some(body),
        }
    }
}

impl Envelope<()> {
    /// Builds the failure envelope for a domain error.
    pub fn failure(err: &ThingError) -> Self {
        Self::Failure(ErrorBody::from(err))
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct RawEnvelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

impl<T> TryFrom<RawEnvelope<T>> for Envelope<T> {
    type Error = String;

    fn try_from(raw: RawEnvelope<T>) -> Result<Self, Self::Error> {
        match (raw.success, raw.data, raw.error) {
            (true, Some(data), None) => Ok(Self::Success(data)),
            (false, None, Some(error)) => Ok(Self::Failure(error)),
            (true, _, _) => Err("success envelope must carry only `data`".to_string()),
            (false, _, _) => Err("failure envelope must carry only `error`".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_shape() {
        let envelope = Envelope::failure(&ThingError::MissingId);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": {"code": "MISSING_ID", "message": "Thing ID is required"}
            })
        );
    }

    #[test]
    fn test_failure_carries_details() {
        let errors = ["Name is required"].into_iter().collect();
        let envelope = Envelope::failure(&ThingError::Validation(errors));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["error"]["details"], serde_json::json!(["Name is required"]));
        assert_eq!(json["error"]["message"], "Validation failed");
    }

    #[test]
    fn test_deserialize_success() {
        let envelope: Envelope<Vec<u8>> =
            serde_json::from_str(r#"{"success":true,"data":[]}"#).unwrap();
        assert_eq!(envelope, Envelope::Success(vec![]));
    }

    #[test]
    fn test_deserialize_rejects_mixed_variants() {
        let result: Result<Envelope<u8>, _> = serde_json::from_str(
            r#"{"success":true,"data":1,"error":{"code":"X","message":"y"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_accessors() {
        let ok = Envelope::success(3);
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&3));
        assert!(ok.error().is_none());

        let err = Envelope::failure(&ThingError::NoFields);
        assert!(!err.is_success());
        assert_eq!(err.error().map(|e| e.code.as_str()), Some("NO_FIELDS"));
    }
}
