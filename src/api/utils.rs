//! API utility functions
//!
//! Pure, stateless helpers for HTTP request processing, kept out of
//! services.rs so they can be unit tested in isolation.

use axum::http::{HeaderMap, header};

use crate::api::error::ApiError;

/// Extract the `Content-Type` header as a string, if present and readable
pub fn content_type_of(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// Extract the declared `Content-Length`, if present and numeric
pub fn content_length_of(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Validate that the body size does not exceed the configured maximum
pub fn validate_body_size(size: u64, max_size: u64) -> Result<(), ApiError> {
    if size > max_size {
        return Err(ApiError::PayloadTooLarge(size));
    }
    Ok(())
}
