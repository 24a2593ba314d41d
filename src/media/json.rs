use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use super::handler::{MediaError, MediaHandler, read_stream};

pub const APPLICATION_JSON: &str = "application/json";

/// Serializer half of a JSON codec: value plus indent level to bytes.
/// An indent of 0 means compact output with no formatting.
pub type DumpsFn = fn(&Value, usize) -> serde_json::Result<Vec<u8>>;

/// Deserializer half of a JSON codec
pub type LoadsFn = fn(&[u8]) -> serde_json::Result<Value>;

fn default_dumps(media: &Value, indent: usize) -> serde_json::Result<Vec<u8>> {
    if indent == 0 {
        return serde_json::to_vec(media);
    }

    let pad = vec![b' '; indent];
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&pad);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    media.serialize(&mut serializer)?;
    Ok(buf)
}

fn default_loads(data: &[u8]) -> serde_json::Result<Value> {
    serde_json::from_slice(data)
}

/// JSON media handler
///
/// The default handler of the stack. Delegates to `serde_json` through a
/// pluggable `dumps`/`loads` pair so a deployer can swap in a faster codec
/// without touching the rest of the negotiation layer.
#[derive(Clone)]
pub struct JsonHandler {
    indent: usize,
    extra_media_types: Vec<String>,
    dumps: DumpsFn,
    loads: LoadsFn,
}

impl JsonHandler {
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            extra_media_types: Vec::new(),
            dumps: default_dumps,
            loads: default_loads,
        }
    }

    /// Replace the JSON codec functions
    pub fn with_codec(mut self, dumps: DumpsFn, loads: LoadsFn) -> Self {
        self.dumps = dumps;
        self.loads = loads;
        self
    }

    /// Declare extra media types accepted on input
    pub fn with_extra_media_types<I, T>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.extra_media_types = extra.into_iter().map(Into::into).collect();
        self
    }

    pub fn dumps(&self, media: &Value) -> Result<Vec<u8>, MediaError> {
        (self.dumps)(media, self.indent).map_err(|err| MediaError::malformed("JSON", err))
    }

    pub fn loads(&self, data: &[u8]) -> Result<Value, MediaError> {
        (self.loads)(data).map_err(|err| MediaError::malformed("JSON", err))
    }
}

impl Default for JsonHandler {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl MediaHandler for JsonHandler {
    fn media_type(&self) -> &str {
        APPLICATION_JSON
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
        self.loads(&data)
    }

    fn serialize(&self, media: &Value, _content_type: &str) -> Result<Bytes, MediaError> {
        self.dumps(media).map(Bytes::from)
    }
}
