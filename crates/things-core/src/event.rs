//! HTTP proxy event and structured result.
//!
//! These mirror the payload-format 2.0 shapes that an HTTP-triggered
//! function receives and returns. Header maps are plain string maps, so
//! header-name case is whatever the caller sent until the header
//! normalizer runs.

use crate::RequestId;
use base64::Engine;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure to turn the raw event body into text.
#[derive(Debug, Error)]
pub enum BodyDecodeError {
    /// `isBase64Encoded` was set but the body is not valid base64.
    #[error("body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// HTTP description inside the request context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHttp {
    /// HTTP method (e.g. `GET`).
    #[serde(default)]
    pub method: String,
    /// Request path.
    #[serde(default)]
    pub path: String,
    /// Caller address, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
}

/// Request context block of the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestContext {
    /// Request ID assigned by the gateway.
    #[serde(default)]
    pub request_id: String,
    /// HTTP details.
    #[serde(default)]
    pub http: EventHttp,
}

/// Inbound HTTP event.
///
/// # Example
///
/// ```
/// use things_core::ApiEvent;
///
/// let event = ApiEvent::new("PATCH", "/things/abc")
///     .with_path_parameter("thingId", "abc")
///     .with_body(r#"{"name":"x"}"#);
///
/// assert_eq!(event.method(), "PATCH");
/// assert_eq!(event.path_parameter("thingId"), Some("abc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    /// Raw request path.
    #[serde(default)]
    pub raw_path: String,
    /// Raw query string (without `?`).
    #[serde(default)]
    pub raw_query_string: String,
    /// Request headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Path parameters extracted by the route.
    #[serde(default)]
    pub path_parameters: BTreeMap<String, String>,
    /// Request body, if any.
    #[serde(default)]
    pub body: Option<String>,
    /// Whether `body` is base64 encoded.
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Gateway request context.
    #[serde(default)]
    pub request_context: EventRequestContext,
}

impl ApiEvent {
    /// Creates an event for the given method and path.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            raw_path: path.clone(),
            request_context: EventRequestContext {
                http: EventHttp {
                    method: method.into(),
                    path,
                    source_ip: None,
                },
                ..EventRequestContext::default()
            },
            ..Self::default()
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets a plain-text body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    /// Sets a base64-encoded body.
    #[must_use]
    pub fn with_base64_body(mut self, encoded: impl Into<String>) -> Self {
        self.body = Some(encoded.into());
        self.is_base64_encoded = true;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.request_context.http.method
    }

    /// Returns the gateway request id when it is a UUID.
    #[must_use]
    pub fn request_id(&self) -> Option<RequestId> {
        self.request_context.request_id.parse().ok()
    }

    /// Returns a path parameter by name.
    ///
    /// Empty values are treated as absent.
    #[must_use]
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the body as text, decoding base64 when flagged.
    ///
    /// An empty body is reported as absent.
    pub fn body_text(&self) -> Result<Option<String>, BodyDecodeError> {
        let Some(body) = self.body.as_deref().filter(|b| !b.is_empty()) else {
            return Ok(None);
        };

        if !self.is_base64_encoded {
            return Ok(Some(body.to_string()));
        }

        let bytes = base64::engine::general_purpose::STANDARD.decode(body)?;
        Ok(Some(String::from_utf8(bytes)?))
    }
}

/// Structured HTTP result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers, if any were set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiResponse {
    /// Creates a response with no headers and no body.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: None,
            body: None,
        }
    }

    /// Creates a response whose body is `value` serialized as JSON.
    ///
    /// No header is set; the pipeline adds the JSON content type.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            body: Some(serde_json::to_string(value)?),
            ..Self::new(status)
        })
    }

    /// Sets a header, keeping the given spelling.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Returns the status as [`StatusCode`].
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()?.get(name).map(String::as_str)
    }
}
