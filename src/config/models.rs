use crate::humanize::ByteSize;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub api: ApiLimits,
}

/// API request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiLimits {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: ByteSize,
}

/// Media negotiation configuration
///
/// Describes the registry built at startup: the default output media type,
/// the JSON handler's indent level (0 means compact output), and the extra
/// media types the JSON handler accepts on input.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    #[serde(default = "default_media_type")]
    pub default_media_type: String,
    #[serde(default)]
    pub json_indent: usize,
    #[serde(default = "default_extra_media_types")]
    pub extra_media_types: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            api: ApiLimits::default(),
        }
    }
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            default_media_type: default_media_type(),
            json_indent: 0,
            extra_media_types: default_extra_media_types(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

fn default_max_body_bytes() -> ByteSize {
    ByteSize(1024 * 1024) // 1 MB
}

fn default_media_type() -> String {
    "application/json".to_string()
}

fn default_extra_media_types() -> Vec<String> {
    vec!["application/json; charset=UTF-8".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.api.max_body_bytes.as_u64(), 1024 * 1024);
        assert_eq!(config.media.default_media_type, "application/json");
        assert_eq!(config.media.json_indent, 0);
        assert_eq!(
            config.media.extra_media_types,
            vec!["application/json; charset=UTF-8"]
        );
    }
}
