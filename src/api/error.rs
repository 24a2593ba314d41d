use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::media::MediaError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("request body of {0} bytes exceeds the configured limit")]
    PayloadTooLarge(u64),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Media(MediaError::Unsupported { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Media(MediaError::Malformed { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Media(MediaError::Stream(_)) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ApiError::Media(MediaError::Unsupported { .. }) => {
                "Unsupported media type".to_string()
            }
            ApiError::Media(MediaError::Malformed { format, .. }) => {
                format!("Invalid {format}")
            }
            ApiError::Media(MediaError::Stream(_)) => "Unreadable body".to_string(),
            ApiError::PayloadTooLarge(_) => "Payload too large".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            title: self.title(),
            description: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_media_type_maps_to_415() {
        let err = ApiError::from(MediaError::unsupported("nope/json", ["application/json"]));
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.title(), "Unsupported media type");
    }

    #[test]
    fn test_malformed_body_maps_to_400() {
        let err = ApiError::from(MediaError::malformed("JSON", "unexpected end of input"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.title(), "Invalid JSON");
        assert_eq!(
            err.to_string(),
            "could not parse JSON body - unexpected end of input"
        );
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = ApiError::PayloadTooLarge(10_000_000);
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
