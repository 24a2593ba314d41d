use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

use super::handler::{MediaError, MediaHandler};
use super::json::{APPLICATION_JSON, JsonHandler};
use crate::config::MediaConfig;

pub const APPLICATION_JSON_UTF8: &str = "application/json; charset=UTF-8";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no handler registered for default media type '{0}'")]
    MissingDefaultHandler(String),
}

/// Registry mapping media types to handler instances
///
/// Holds the handler table and the designated default output type. The
/// registry is built once at startup and read-only afterwards, so it is safe
/// to share across concurrently processed requests.
#[derive(Clone)]
pub struct MediaHandlers {
    default_media_type: String,
    handlers: BTreeMap<String, Arc<dyn MediaHandler>>,
    media_types: Vec<String>,
}

impl MediaHandlers {
    /// Build a registry from a handler mapping and a default media type.
    ///
    /// Every handler's extra media types become additional mapping keys unless
    /// the key is already taken. The default media type must end up as a key
    /// of the mapping; a miss is a configuration error.
    pub fn new(
        default_media_type: impl Into<String>,
        mut handlers: BTreeMap<String, Arc<dyn MediaHandler>>,
    ) -> Result<Self, RegistryError> {
        let default_media_type = default_media_type.into();

        let mut extra = Vec::new();
        for handler in handlers.values() {
            for media_type in handler.extra_media_types() {
                if !handlers.contains_key(media_type) {
                    extra.push((media_type.clone(), Arc::clone(handler)));
                }
            }
        }
        for (media_type, handler) in extra {
            handlers.entry(media_type).or_insert(handler);
        }

        if !handlers.contains_key(&default_media_type) {
            return Err(RegistryError::MissingDefaultHandler(default_media_type));
        }

        let media_types = handlers.keys().cloned().collect();
        Ok(Self {
            default_media_type,
            handlers,
            media_types,
        })
    }

    /// Registry with the stock JSON handler under `application/json` and its
    /// UTF-8 charset variant
    pub fn with_defaults() -> Self {
        let handler: Arc<dyn MediaHandler> = Arc::new(JsonHandler::default());

        let mut handlers: BTreeMap<String, Arc<dyn MediaHandler>> = BTreeMap::new();
        handlers.insert(APPLICATION_JSON.to_string(), Arc::clone(&handler));
        handlers.insert(APPLICATION_JSON_UTF8.to_string(), handler);

        let media_types = handlers.keys().cloned().collect();
        Self {
            default_media_type: APPLICATION_JSON.to_string(),
            handlers,
            media_types,
        }
    }

    /// Build the registry described by the `[media]` configuration section
    pub fn from_config(cfg: &MediaConfig) -> Result<Self, RegistryError> {
        let handler = JsonHandler::new(cfg.json_indent)
            .with_extra_media_types(cfg.extra_media_types.iter().cloned());

        let mut handlers: BTreeMap<String, Arc<dyn MediaHandler>> = BTreeMap::new();
        handlers.insert(handler.media_type().to_string(), Arc::new(handler));

        Self::new(cfg.default_media_type.clone(), handlers)
    }

    pub fn default_media_type(&self) -> &str {
        &self.default_media_type
    }

    /// Media types the registry can deserialize, in sorted order
    pub fn media_types(&self) -> impl Iterator<Item = &str> {
        self.media_types.iter().map(String::as_str)
    }

    /// Resolve a request media type to a handler.
    ///
    /// A missing, empty, or `*/*` media type resolves to the default handler.
    /// Everything else is an exact-string lookup; a miss is an
    /// unsupported-media-type error listing the registry's configured keys.
    pub fn resolve(
        &self,
        media_type: Option<&str>,
    ) -> Result<&Arc<dyn MediaHandler>, MediaError> {
        let media_type = match media_type {
            None | Some("") | Some("*/*") => &self.default_media_type,
            Some(other) => other,
        };

        self.handlers
            .get(media_type)
            .ok_or_else(|| MediaError::unsupported(media_type, &self.media_types))
    }

    /// Handler registered under the default media type
    pub fn default_handler(&self) -> &Arc<dyn MediaHandler> {
        // The constructor guarantees the default type is a mapping key.
        &self.handlers[&self.default_media_type]
    }
}

/// The registry is itself a media handler: its primary type is the configured
/// default and its extra types are the mapping keys. A resource can therefore
/// hold a single concrete handler or a whole registry behind the same seam.
#[async_trait]
impl MediaHandler for MediaHandlers {
    fn media_type(&self) -> &str {
        &self.default_media_type
    }

    fn extra_media_types(&self) -> &[String] {
        &self.media_types
    }

    fn allowed_media_types(&self) -> Vec<String> {
        self.media_types.clone()
    }

    async fn deserialize(
        &self,
        stream: Body,
        content_type: &str,
        content_length: Option<u64>,
    ) -> Result<Value, MediaError> {
        let handler = self.resolve(Some(content_type).filter(|t| !t.is_empty()))?;
        handler.deserialize(stream, content_type, content_length).await
    }

    /// Serialization always goes through the handler for the requested type;
    /// response pipelines pass the default type here, so output format never
    /// mirrors the request's `Content-Type`.
    fn serialize(&self, media: &Value, content_type: &str) -> Result<Bytes, MediaError> {
        let handler = self.resolve(Some(content_type).filter(|t| !t.is_empty()))?;
        handler.serialize(media, content_type)
    }
}
