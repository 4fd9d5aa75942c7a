use crate::utils::error::ApiError;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

// Header names are matched case-insensitively; the canonical wire spelling
// is "CorrelationId".
pub static CORRELATION_ID: HeaderName = HeaderName::from_static("correlationid");

pub const DEFAULT_CORRELATION_ID: &str = "undefined";

const SUPPORTED_MEDIA_TYPES: &[&str] = &["application/json"];

// Error body mirroring the framework's default error view, extended with a
// correlation id so clients can tie failures back to their requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub correlation_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub exception: String,
    pub message: String,
    pub path: String,
}

pub fn resolve_correlation_id(header_value: Option<&str>) -> String {
    match header_value {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => DEFAULT_CORRELATION_ID.to_string(),
    }
}

// Walks the Accept header's candidates in order and returns the first media
// type the server supports. Unparsable headers are swallowed; no content
// type is forced.
pub fn negotiate_content_type(accept: Option<&str>) -> Option<&'static str> {
    let accept = accept?;
    for candidate in accept.split(',') {
        let media_type = candidate.split(';').next().unwrap_or("").trim();
        if let Some(supported) = SUPPORTED_MEDIA_TYPES
            .iter()
            .find(|s| s.eq_ignore_ascii_case(media_type))
        {
            return Some(supported);
        }
    }
    None
}

pub fn build_error_body(error: &ApiError, path: &str, correlation_id: &str) -> ErrorBody {
    let status = error.status_code();
    let (exception, message) = error.root_cause();
    ErrorBody {
        correlation_id: correlation_id.to_string(),
        timestamp: Utc::now(),
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("").to_string(),
        exception: exception.to_string(),
        message,
        path: path.to_string(),
    }
}

// The single place where a failed request becomes a client-facing response:
// normalized body, mapped status, correlation id echoed, content type
// negotiated.
#[derive(Debug)]
pub struct ErrorResponse {
    error: ApiError,
    correlation_id: String,
    path: String,
    accept: Option<String>,
}

impl ErrorResponse {
    pub fn new(
        error: ApiError,
        correlation_id: String,
        path: String,
        accept: Option<String>,
    ) -> Self {
        Self {
            error,
            correlation_id,
            path,
            accept,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        tracing::debug!(
            correlation_id = %self.correlation_id,
            "generating error response for [{}]",
            self.error.kind_name()
        );
        if status.is_server_error() {
            tracing::error!(
                correlation_id = %self.correlation_id,
                "unexpected exception: {:?}",
                self.error
            );
        } else if status.is_client_error() {
            tracing::warn!(
                correlation_id = %self.correlation_id,
                "client exception: {}",
                self.error
            );
        }

        let body = build_error_body(&self.error, &self.path, &self.correlation_id);
        let json = serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string());

        let mut response = (status, json).into_response();
        response.headers_mut().remove(CONTENT_TYPE);
        if let Some(content_type) = negotiate_content_type(self.accept.as_deref()) {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if let Ok(value) = HeaderValue::from_str(&self.correlation_id) {
            response.headers_mut().insert(CORRELATION_ID.clone(), value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn correlation_id_passes_through() {
        assert_eq!(resolve_correlation_id(Some("abc123")), "abc123");
    }

    #[test]
    fn correlation_id_defaults_when_absent_or_blank() {
        assert_eq!(resolve_correlation_id(None), DEFAULT_CORRELATION_ID);
        assert_eq!(resolve_correlation_id(Some("")), DEFAULT_CORRELATION_ID);
        assert_eq!(resolve_correlation_id(Some("   ")), DEFAULT_CORRELATION_ID);
    }

    #[test]
    fn negotiation_picks_first_supported_candidate() {
        assert_eq!(
            negotiate_content_type(Some("application/json")),
            Some("application/json")
        );
        assert_eq!(
            negotiate_content_type(Some("text/html, application/json;q=0.9")),
            Some("application/json")
        );
        assert_eq!(
            negotiate_content_type(Some("Application/JSON")),
            Some("application/json")
        );
    }

    #[test]
    fn negotiation_forces_nothing() {
        assert_eq!(negotiate_content_type(None), None);
        assert_eq!(negotiate_content_type(Some("application/xml")), None);
        assert_eq!(negotiate_content_type(Some(",,;;garbage")), None);
    }

    #[test]
    fn body_reports_root_cause() {
        let io = std::io::Error::other("connection reset");
        let error = ApiError::service_unavailable("Unable to retrieve data").with_source(io);
        let body = build_error_body(&error, "/api/info", "abc123");

        assert_eq!(body.correlation_id, "abc123");
        assert_eq!(body.status, 503);
        assert_eq!(body.error, "Service Unavailable");
        assert_eq!(body.exception, "ServiceUnavailable");
        assert_eq!(body.message, "connection reset");
        assert_eq!(body.path, "/api/info");
    }

    #[test]
    fn body_serializes_with_wire_names() {
        let body = build_error_body(&ApiError::bad_request("bad id"), "/api/info", "undefined");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["correlationId"], "undefined");
        assert_eq!(json["status"], 400);
        assert_eq!(json["error"], "Bad Request");
        assert_eq!(json["exception"], "BadRequest");
        assert_eq!(json["message"], "bad id");
        assert_eq!(json["path"], "/api/info");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn response_carries_status_header_and_negotiated_type() {
        let response = ErrorResponse::new(
            ApiError::not_found("No data available for this id: AB1"),
            "abc123".to_string(),
            "/api/info".to_string(),
            Some("application/json".to_string()),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(&CORRELATION_ID).unwrap(),
            "abc123"
        );
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["exception"], "NotFound");
    }

    #[tokio::test]
    async fn unsupported_accept_forces_no_content_type() {
        let response = ErrorResponse::new(
            ApiError::bad_request("bad id"),
            "undefined".to_string(),
            "/api/info".to_string(),
            Some("application/xml".to_string()),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }
}
