use super::models::Config;
use thiserror::Error;

// Hard ceiling for request bodies regardless of configuration.
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

const MAX_JSON_INDENT: usize = 16;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("'{media_type}' is not a valid media type ({field})")]
    InvalidMediaType { field: String, media_type: String },

    #[error("json_indent ({actual}) exceeds limit of {limit}")]
    JsonIndentExceedsLimit { actual: usize, limit: usize },

    #[error("max_body_bytes must be positive")]
    InvalidMaxBodyBytes,

    #[error("max_body_bytes ({actual}) exceeds limit of 16MB ({limit})")]
    BodySizeExceedsLimit { actual: u64, limit: u64 },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_media(config)?;
    validate_limits(config)?;
    Ok(())
}

/// Every configured media type must parse as a mime type; the JSON indent
/// level is capped to keep responses bounded
fn validate_media(config: &Config) -> Result<(), ValidationError> {
    check_media_type("media.default_media_type", &config.media.default_media_type)?;

    for media_type in &config.media.extra_media_types {
        check_media_type("media.extra_media_types", media_type)?;
    }

    if config.media.json_indent > MAX_JSON_INDENT {
        return Err(ValidationError::JsonIndentExceedsLimit {
            actual: config.media.json_indent,
            limit: MAX_JSON_INDENT,
        });
    }

    Ok(())
}

fn check_media_type(field: &str, media_type: &str) -> Result<(), ValidationError> {
    media_type
        .parse::<mime::Mime>()
        .map_err(|_| ValidationError::InvalidMediaType {
            field: field.to_string(),
            media_type: media_type.to_string(),
        })?;
    Ok(())
}

fn validate_limits(config: &Config) -> Result<(), ValidationError> {
    let max_body_bytes = config.server.api.max_body_bytes.as_u64();

    if max_body_bytes == 0 {
        return Err(ValidationError::InvalidMaxBodyBytes);
    }

    if max_body_bytes > MAX_BODY_BYTES {
        return Err(ValidationError::BodySizeExceedsLimit {
            actual: max_body_bytes,
            limit: MAX_BODY_BYTES,
        });
    }

    Ok(())
}
