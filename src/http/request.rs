//! Request identification.
//!
//! # Responsibilities
//! - Name the header carrying the request ID
//! - Build the per-request tracing span so every log line carries the ID
//!
//! The ID itself is generated by `tower_http::request_id` (UUID v4) unless
//! the client supplied one, and echoed back on the response.

use axum::extract::Request;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID assigned to `request`, or `"unknown"`.
pub fn request_id<B>(request: &axum::http::Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Span wrapping the handling of one request.
pub fn request_span(request: &Request) -> tracing::Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_request_id_lookup() {
        let req = axum::http::Request::builder()
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id(&req), "abc-123");

        let req = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_id(&req), "unknown");
    }
}
