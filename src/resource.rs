use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::api::utils::{content_length_of, content_type_of};
use crate::media::{MediaError, MediaHandler, MediaHandlers};

/// A request-handling resource wired into the media layer
///
/// A resource owns (shares, never mutates) a configured media handler, which
/// may be a single concrete handler or a whole [`MediaHandlers`] registry.
/// The request pipeline calls [`read_body`](Resource::read_body) at the
/// body-read point and [`write_body`](Resource::write_body) at the body-write
/// point; the resource's own logic lives in [`process`](Resource::process).
#[async_trait]
pub trait Resource: Send + Sync {
    /// The media handler consulted at the body read and write points
    fn media_handler(&self) -> &dyn MediaHandler;

    /// Resource logic between deserialization and serialization
    async fn process(&self, media: Value) -> Result<Value, MediaError>;

    /// Body-read point of the request pipeline.
    ///
    /// Rejects a `Content-Type` the handler does not accept before any byte
    /// of the body is parsed. A missing or `*/*` content type falls through
    /// to the handler's own format.
    async fn read_body(&self, headers: &HeaderMap, stream: Body) -> Result<Value, MediaError> {
        let handler = self.media_handler();
        let content_type = content_type_of(headers).unwrap_or_default();

        if !content_type.is_empty()
            && content_type != "*/*"
            && !handler.accepts(content_type)
        {
            return Err(MediaError::unsupported(
                content_type,
                handler.allowed_media_types(),
            ));
        }

        handler
            .deserialize(stream, content_type, content_length_of(headers))
            .await
    }

    /// Body-write point of the request pipeline.
    ///
    /// Serializes with the handler's primary media type and sets it as the
    /// response `Content-Type`, regardless of what the request asked for.
    fn write_body(&self, media: &Value) -> Result<Response, MediaError> {
        let handler = self.media_handler();
        let media_type = handler.media_type().to_string();
        let data = handler.serialize(media, &media_type)?;

        Ok((StatusCode::OK, [(header::CONTENT_TYPE, media_type)], data).into_response())
    }
}

/// Built-in resource that returns the deserialized media unchanged
pub struct EchoResource {
    media: Arc<MediaHandlers>,
}

impl EchoResource {
    pub fn new(media: Arc<MediaHandlers>) -> Self {
        Self { media }
    }
}

#[async_trait]
impl Resource for EchoResource {
    fn media_handler(&self) -> &dyn MediaHandler {
        self.media.as_ref()
    }

    async fn process(&self, media: Value) -> Result<Value, MediaError> {
        Ok(media)
    }
}
