//! Library-level tests driving the media layer with a custom handler,
//! the way a deployer extending the stack would.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, header};
use bytes::Bytes;
use serde_json::{Value, json};

use mediabox::media::{
    JsonHandler, MediaError, MediaHandler, MediaHandlers, read_stream,
};
use mediabox::resource::{EchoResource, Resource};

/// Handler for plain text bodies, stored as JSON strings
struct TextHandler {
    extra_media_types: Vec<String>,
}

impl TextHandler {
    fn new() -> Self {
        Self {
            extra_media_types: Vec::new(),
        }
    }

    fn with_extra_media_types(extra: Vec<String>) -> Self {
        Self {
            extra_media_types: extra,
        }
    }
}

#[async_trait]
impl MediaHandler for TextHandler {
    fn media_type(&self) -> &str {
        "text/plain"
    }

    fn extra_media_types(&self) -> &[String] {
        &self.extra_media_types
    }

    async fn deserialize(
        &self,
        stream: Body,
        _content_type: &str,
        content_length: Option<u64>,
    ) -> Result<Value, MediaError> {
        let data = read_stream(stream, content_length).await?;
        let text = std::str::from_utf8(&data)
            .map_err(|err| MediaError::malformed("text", err))?;
        Ok(Value::String(text.to_string()))
    }

    fn serialize(&self, media: &Value, _content_type: &str) -> Result<Bytes, MediaError> {
        match media {
            Value::String(text) => Ok(Bytes::from(text.clone())),
            other => Ok(Bytes::from(other.to_string())),
        }
    }
}

fn mixed_registry() -> MediaHandlers {
    let mut handlers: BTreeMap<String, Arc<dyn MediaHandler>> = BTreeMap::new();
    handlers.insert(
        "application/json".to_string(),
        Arc::new(JsonHandler::default()),
    );
    handlers.insert("text/plain".to_string(), Arc::new(TextHandler::new()));

    MediaHandlers::new("application/json", handlers).unwrap()
}

#[tokio::test]
async fn test_registry_dispatches_per_content_type() {
    let registry = mixed_registry();

    let media = registry
        .deserialize(Body::from("hello"), "text/plain", Some(5))
        .await
        .unwrap();
    assert_eq!(media, Value::String("hello".to_string()));

    let media = registry
        .deserialize(Body::from(r#"{"hello": true}"#), "application/json", None)
        .await
        .unwrap();
    assert_eq!(media, json!({"hello": true}));
}

#[tokio::test]
async fn test_registry_miss_lists_all_keys() {
    let registry = mixed_registry();
    let err = registry.resolve(Some("application/xml")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "'application/xml' is an unsupported media type, supported media types: \
         'application/json', 'text/plain'"
    );
}

#[tokio::test]
async fn test_extra_media_types_resolve_to_declaring_handler() {
    let extra = vec!["application/vnd.example+text".to_string()];
    let mut handlers: BTreeMap<String, Arc<dyn MediaHandler>> = BTreeMap::new();
    handlers.insert(
        "text/plain".to_string(),
        Arc::new(TextHandler::with_extra_media_types(extra)),
    );

    let registry = MediaHandlers::new("text/plain", handlers).unwrap();
    let handler = registry.resolve(Some("application/vnd.example+text")).unwrap();
    assert_eq!(handler.media_type(), "text/plain");
}

#[tokio::test]
async fn test_malformed_bytes_always_surface_as_malformed() {
    let registry = mixed_registry();

    // Invalid UTF-8, truncated JSON, and bare garbage must all come back as
    // Malformed, never as a different error or a partial value.
    let cases: Vec<Vec<u8>> = vec![
        vec![0xff, 0xfe, 0x00],
        b"{\"open\": ".to_vec(),
        b"not json at all".to_vec(),
    ];

    for bytes in cases {
        let result = registry
            .deserialize(Body::from(bytes), "application/json", None)
            .await;
        assert!(matches!(result, Err(MediaError::Malformed { .. })));
    }
}

#[tokio::test]
async fn test_resource_output_ignores_request_content_type() {
    let resource = EchoResource::new(Arc::new(mixed_registry()));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let media = resource
        .read_body(&headers, Body::from("hello"))
        .await
        .unwrap();
    let response = resource.write_body(&media).unwrap();

    // Input was text/plain, but output always uses the registry default
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_single_handler_resource() {
    // A resource can also be bound to one concrete handler instead of a
    // registry; the trait seam is the same.
    struct TextResource {
        handler: TextHandler,
    }

    #[async_trait]
    impl Resource for TextResource {
        fn media_handler(&self) -> &dyn MediaHandler {
            &self.handler
        }

        async fn process(&self, media: Value) -> Result<Value, MediaError> {
            Ok(media)
        }
    }

    let resource = TextResource {
        handler: TextHandler::new(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let media = resource
        .read_body(&headers, Body::from("hello"))
        .await
        .unwrap();
    assert_eq!(media, Value::String("hello".to_string()));

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let err = resource
        .read_body(&headers, Body::from("{}"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "'application/json' is an unsupported media type, supported media types: 'text/plain'"
    );
}
