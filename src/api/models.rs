//! API models for the demo negotiation service.
//!
//! Structured error bodies carry a human-readable `title` and a `description`
//! naming the rejected media type and the supported alternatives, so clients
//! can self-diagnose 400/415 responses without reading server logs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MediaTypesResponse {
    pub default: String,
    pub supported: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
}
