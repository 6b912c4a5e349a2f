//! Conversion between hyper requests and the event model.

use base64::Engine;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};
use http_body_util::Full;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use things_core::{ApiEvent, ApiResponse, RequestId, APPLICATION_JSON};
use things_middleware::InvocationFailure;
use things_service::THING_ID_PARAM;
use tracing::{error, warn};

/// HTTP response type produced by the server.
pub type HttpResponse = Response<Full<Bytes>>;

/// Builds an event from a buffered request.
///
/// Repeated headers are joined with `", "`. A body that is not UTF-8 is
/// base64 encoded and flagged. An empty body is absent.
pub fn to_event(request: &Request<Bytes>, thing_id: Option<&str>, remote_addr: Option<SocketAddr>) -> ApiEvent {
    let uri = request.uri();
    let mut event = ApiEvent::new(request.method().as_str(), uri.path());
    event.raw_query_string = uri.query().unwrap_or_default().to_string();
    event.headers = collect_headers(request.headers());
    event.request_context.request_id = RequestId::new().to_string();
    event.request_context.http.source_ip = remote_addr.map(|addr| addr.ip().to_string());

    if let Some(id) = thing_id {
        event = event.with_path_parameter(THING_ID_PARAM, id);
    }

    let body = request.body();
    if !body.is_empty() {
        event = match std::str::from_utf8(body) {
            Ok(text) => event.with_body(text),
            Err(_) => event.with_base64_body(base64::engine::general_purpose::STANDARD.encode(body)),
        };
    }

    event
}

fn collect_headers(headers: &http::HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            warn!(header = %name, "Dropping non-text header value");
            continue;
        };
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

/// Builds the HTTP response for a structured result.
///
/// A response without a content type in any spelling is sent as JSON.
pub fn to_http(response: ApiResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    let mut has_content_type = false;

    for (name, value) in response.headers.iter().flatten() {
        let Ok(value) = HeaderValue::from_str(value) else {
            warn!(header = %name, "Dropping invalid response header");
            continue;
        };
        has_content_type |= name.eq_ignore_ascii_case(CONTENT_TYPE.as_str());
        builder = builder.header(name.as_str(), value);
    }

    if !has_content_type {
        builder = builder.header(CONTENT_TYPE, APPLICATION_JSON);
    }

    let body = response.body.map(Bytes::from).unwrap_or_default();
    builder
        .body(Full::new(body))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Turns a pipeline outcome into the response to send.
///
/// An unhandled failure is logged and answered with its response if the
/// interceptor produced one, otherwise with a bare 500.
pub fn surface(outcome: Result<ApiResponse, InvocationFailure>) -> ApiResponse {
    match outcome {
        Ok(response) => response,
        Err(failure) => {
            error!(error = %failure.error, "Invocation failed");
            failure
                .response
                .unwrap_or_else(|| ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use http_body_util::BodyExt;
    use things_core::HandlerError;

    fn request(method: Method, uri: &str, body: &'static [u8]) -> Request<Bytes> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .header("x-tag", "a")
            .header("x-tag", "b")
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_event_from_request() {
        let req = request(Method::PATCH, "/things/abc?verbose=1", br#"{"name":"x"}"#);
        let addr: SocketAddr = "10.0.0.1:5000".parse().unwrap();

        let event = to_event(&req, Some("abc"), Some(addr));

        assert_eq!(event.method(), "PATCH");
        assert_eq!(event.raw_path, "/things/abc");
        assert_eq!(event.raw_query_string, "verbose=1");
        assert_eq!(event.path_parameter(THING_ID_PARAM), Some("abc"));
        assert_eq!(event.body.as_deref(), Some(r#"{"name":"x"}"#));
        assert!(!event.is_base64_encoded);
        assert_eq!(event.headers.get("x-tag").map(String::as_str), Some("a, b"));
        assert_eq!(event.request_context.http.source_ip.as_deref(), Some("10.0.0.1"));
        assert!(event.request_id().is_some());
    }

    #[test]
    fn test_empty_body_is_absent() {
        let event = to_event(&request(Method::GET, "/things", b""), None, None);
        assert!(event.body.is_none());
        assert!(event.path_parameters.is_empty());
    }

    #[test]
    fn test_binary_body_is_base64() {
        let event = to_event(&request(Method::POST, "/things", &[0xff, 0xfe]), None, None);
        assert!(event.is_base64_encoded);
        assert_eq!(event.body.as_deref(), Some("//4="));
    }

    #[tokio::test]
    async fn test_http_response_defaults_content_type() {
        let response = to_http(ApiResponse::new(StatusCode::CREATED));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), APPLICATION_JSON);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_http_response_keeps_existing_content_type() {
        let response = to_http(ApiResponse::new(StatusCode::OK).with_header("Content-Type", "text/plain"));
        let values: Vec<_> = response.headers().get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values, ["text/plain"]);
    }

    #[test]
    fn test_surface_failure_without_response() {
        let failure = InvocationFailure::new(HandlerError::Panic("boom".into()), None);
        assert_eq!(surface(Err(failure)).status_code, 500);
    }
}
