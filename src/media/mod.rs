//! Media type negotiation and serialization
//!
//! This module maps HTTP `Content-Type` values to serialize/deserialize
//! routines behind a single trait.
//!
//! ## Key Components
//!
//! - [`MediaHandler`] - Contract implemented by every concrete handler
//! - [`JsonHandler`] - Stock handler wrapping a pluggable JSON codec
//! - [`MediaHandlers`] - Registry resolving media types to handler instances
//! - [`MediaError`] - Unsupported-type and malformed-body client errors
//!
//! ## Example
//!
//! ```rust,ignore
//! use mediabox::media::{MediaHandler, MediaHandlers};
//!
//! let registry = MediaHandlers::with_defaults();
//! let handler = registry.resolve(Some("application/json"))?;
//!
//! let media = handler.deserialize(stream, "application/json", Some(len)).await?;
//! let body = registry.default_handler().serialize(&media, registry.default_media_type())?;
//! ```

mod handler;
mod json;
mod registry;

pub use handler::{MediaError, MediaHandler, read_stream};
pub use json::{APPLICATION_JSON, DumpsFn, JsonHandler, LoadsFn};
pub use registry::{APPLICATION_JSON_UTF8, MediaHandlers, RegistryError};
