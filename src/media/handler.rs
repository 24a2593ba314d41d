use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use thiserror::Error;

/// Media negotiation errors
///
/// Both variants are client errors: `Unsupported` maps to HTTP 415 and
/// `Malformed` to HTTP 400. Neither corrupts any state and neither is retried.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("'{media_type}' is an unsupported media type, supported media types: {supported}")]
    Unsupported {
        media_type: String,
        supported: String,
    },
    #[error("could not parse {format} body - {reason}")]
    Malformed { format: String, reason: String },
    #[error("failed to read request body: {0}")]
    Stream(String),
}

impl MediaError {
    /// Build an `Unsupported` error listing the given media types.
    ///
    /// Types are quoted and sorted so the message is stable regardless of
    /// the iteration order of the caller's collection.
    pub fn unsupported<I, T>(media_type: &str, supported: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut types: Vec<String> = supported
            .into_iter()
            .map(|t| format!("'{}'", t.as_ref()))
            .collect();
        types.sort();

        MediaError::Unsupported {
            media_type: media_type.to_string(),
            supported: types.join(", "),
        }
    }

    pub fn malformed(format: impl Into<String>, reason: impl ToString) -> Self {
        MediaError::Malformed {
            format: format.into(),
            reason: reason.to_string(),
        }
    }
}

/// Contract for an internet media type handler
///
/// A handler is bound to exactly one primary media type and may declare extra
/// media types it accepts on input. Handlers are stateless across requests
/// and shared read-only, so implementations must not carry per-request state.
#[async_trait]
pub trait MediaHandler: Send + Sync {
    /// Primary media type this handler produces and consumes
    fn media_type(&self) -> &str;

    /// Extra media types accepted when deserializing request bodies
    fn extra_media_types(&self) -> &[String] {
        &[]
    }

    /// All media types supported for deserialization (primary + extras)
    fn allowed_media_types(&self) -> Vec<String> {
        let mut types = vec![self.media_type().to_string()];
        types.extend(self.extra_media_types().iter().cloned());
        types
    }

    /// Whether this handler accepts the given media type on input
    fn accepts(&self, media_type: &str) -> bool {
        self.media_type() == media_type
            || self.extra_media_types().iter().any(|t| t == media_type)
    }

    /// Deserialize a request body stream into a media value
    ///
    /// Reads at most `content_length` bytes from the stream. Parse failures
    /// surface as [`MediaError::Malformed`].
    async fn deserialize(
        &self,
        stream: Body,
        content_type: &str,
        content_length: Option<u64>,
    ) -> Result<Value, MediaError>;

    /// Serialize a media value for a response body
    fn serialize(&self, media: &Value, content_type: &str) -> Result<Bytes, MediaError>;
}

impl std::fmt::Debug for dyn MediaHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaHandler")
            .field("media_type", &self.media_type())
            .finish()
    }
}

/// Collect a body stream, honoring the declared content length
///
/// When the declared length is shorter than the collected bytes the surplus
/// is dropped, mirroring a reader that stops at `content_length`.
pub async fn read_stream(
    stream: Body,
    content_length: Option<u64>,
) -> Result<Bytes, MediaError> {
    let collected = stream
        .collect()
        .await
        .map_err(|err| MediaError::Stream(err.to_string()))?
        .to_bytes();

    match content_length {
        Some(declared) if (declared as usize) < collected.len() => {
            Ok(collected.slice(..declared as usize))
        }
        _ => Ok(collected),
    }
}
