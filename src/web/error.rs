//! API error handling for the pdfdrop web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Unsupported media type (415).
    UnsupportedMediaType,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a payload too large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Create an unsupported media type error.
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedMediaType, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<crate::PdfdropError> for ApiError {
    fn from(err: crate::PdfdropError) -> Self {
        match &err {
            // Traversal attempts and genuinely missing files answer the
            // same 404 so the status code confirms nothing about paths
            // outside the storage root. The server log keeps them apart.
            crate::PdfdropError::PathTraversal(name) => {
                tracing::warn!("path traversal rejected: {:?}", name);
                ApiError::not_found("file not found")
            }
            crate::PdfdropError::NotFound(_) => ApiError::not_found("file not found"),
            crate::PdfdropError::PayloadTooLarge { actual, limit } => {
                ApiError::payload_too_large(format!(
                    "upload of {actual} bytes exceeds the limit of {limit} bytes"
                ))
            }
            crate::PdfdropError::UnsupportedMediaType(_) => {
                ApiError::unsupported_media_type("only PDF files are accepted")
            }
            crate::PdfdropError::InvalidArgument(msg) => ApiError::bad_request(msg.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PdfdropError;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(ApiError::bad_request("bad").code(), ErrorCode::BadRequest);
        assert_eq!(ApiError::not_found("missing").code(), ErrorCode::NotFound);
        assert_eq!(
            ApiError::payload_too_large("big").code(),
            ErrorCode::PayloadTooLarge
        );
        assert_eq!(
            ApiError::unsupported_media_type("type").code(),
            ErrorCode::UnsupportedMediaType
        );
        assert_eq!(ApiError::internal("oops").code(), ErrorCode::InternalError);
    }

    #[test]
    fn test_traversal_and_missing_are_indistinguishable() {
        let traversal: ApiError = PdfdropError::PathTraversal("../../x".to_string()).into();
        let missing: ApiError = PdfdropError::NotFound("file".to_string()).into();

        assert_eq!(traversal.code(), ErrorCode::NotFound);
        assert_eq!(missing.code(), ErrorCode::NotFound);
        assert_eq!(traversal.message, missing.message);
    }

    #[test]
    fn test_io_error_hides_detail() {
        let io = PdfdropError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "/var/secret/uploads",
        ));
        let err: ApiError = io.into();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.message.contains("/var/secret"));
    }

    #[test]
    fn test_payload_too_large_mapping() {
        let err: ApiError = PdfdropError::PayloadTooLarge {
            actual: 11,
            limit: 10,
        }
        .into();

        assert_eq!(err.code(), ErrorCode::PayloadTooLarge);
    }
}
