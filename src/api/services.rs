use axum::{
    Json,
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::state::AppState;
use crate::api::error::ApiError;
use crate::api::models::{HealthResponse, MediaTypesResponse};
use crate::api::utils;
use crate::media::{MediaError, read_stream};
use crate::resource::Resource;

/// Media round-trip endpoint (POST /echo)
///
/// Demonstrates both pipeline integration points of the media layer:
/// - body-read: the request `Content-Type` is resolved against the registry
///   and the body deserialized by the matching handler;
/// - body-write: the response is always serialized by the handler registered
///   under the configured default media type.
///
/// Unsupported input types yield 415, unparseable bodies 400, oversized
/// bodies 413 - all with structured `title`/`description` error bodies.
pub async fn echo(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();

    // Enforce the configured size limit before handing the bytes to a parser.
    // Decompression already happened at the middleware layer, so this bounds
    // the inflated size.
    let content_length = utils::content_length_of(&parts.headers);
    let data = read_stream(body, content_length).await.map_err(ApiError::from)?;
    utils::validate_body_size(
        data.len() as u64,
        state.config.server.api.max_body_bytes.as_u64(),
    )?;

    let media = match state.echo.read_body(&parts.headers, Body::from(data)).await {
        Ok(media) => {
            state.metrics.body_deserialized();
            media
        }
        Err(err) => {
            match &err {
                MediaError::Unsupported { media_type, .. } => {
                    tracing::debug!(%media_type, "Rejected unsupported media type");
                    state.metrics.unsupported_media();
                }
                MediaError::Malformed { .. } => state.metrics.malformed_body(),
                MediaError::Stream(_) => {}
            }
            return Err(err.into());
        }
    };

    let media = state.echo.process(media).await?;

    let response = state.echo.write_body(&media)?;
    state.metrics.response_serialized();
    Ok(response)
}

/// Negotiation introspection endpoint (GET /media-types)
///
/// Reports the configured default output type and every media type the
/// registry accepts on input.
pub async fn media_types(State(state): State<AppState>) -> impl IntoResponse {
    let response = MediaTypesResponse {
        default: state.media.default_media_type().to_string(),
        supported: state.media.media_types().map(str::to_string).collect(),
    };

    (StatusCode::OK, Json(response))
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert(
        "media".to_string(),
        format!("{} media types registered", state.media.media_types().count()),
    );

    let response = HealthResponse {
        status: "healthy".to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
