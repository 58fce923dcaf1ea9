//! Mapping of translation outcomes to HTTP responses.
//!
//! Bodies are JSON strings (`"done"`, `"OK"`, `"not enough parameters"`)
//! so existing callers keep parsing them unchanged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::color::{ColorError, TranslateError};

/// Body sent when a custom color carries the wrong number of RGB parts.
pub const NOT_ENOUGH_PARAMETERS: &str = "not enough parameters";

/// An error response with a JSON string body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ColorError> for ApiError {
    fn from(err: ColorError) -> Self {
        match err {
            ColorError::RgbArity(_) | ColorError::MissingRgb => {
                Self::new(StatusCode::BAD_REQUEST, NOT_ENOUGH_PARAMETERS)
            }
            ColorError::UnknownColor(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::Color(e) => e.into(),
            TranslateError::Publish(e) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mqtt::PublishError;

    #[test]
    fn test_color_errors_are_client_errors() {
        let err = ApiError::from(ColorError::RgbArity(2));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, NOT_ENOUGH_PARAMETERS);

        let err = ApiError::from(TranslateError::from(ColorError::UnknownColor("teal".into())));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "unknown color: teal");
    }

    #[test]
    fn test_publish_error_is_server_error() {
        let err = ApiError::from(TranslateError::from(PublishError::Rejected(
            "connection closed".into(),
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "connection closed");
    }

    #[tokio::test]
    async fn test_body_is_json_string() {
        let response = ApiError::new(StatusCode::BAD_REQUEST, "nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"\"nope\"");
    }
}
