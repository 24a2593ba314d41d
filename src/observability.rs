//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the media negotiation pipeline
#[derive(Debug, Default)]
pub struct Metrics {
    bodies_deserialized: AtomicU64,
    responses_serialized: AtomicU64,
    unsupported_media: AtomicU64,
    malformed_bodies: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_deserialized(&self) {
        self.bodies_deserialized.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "bodies_deserialized", "Metric incremented");
    }

    pub fn response_serialized(&self) {
        self.responses_serialized.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "responses_serialized", "Metric incremented");
    }

    pub fn unsupported_media(&self) {
        self.unsupported_media.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "unsupported_media", "Metric incremented");
    }

    pub fn malformed_body(&self) {
        self.malformed_bodies.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "malformed_bodies", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bodies_deserialized: self.bodies_deserialized.load(Ordering::Relaxed),
            responses_serialized: self.responses_serialized.load(Ordering::Relaxed),
            unsupported_media: self.unsupported_media.load(Ordering::Relaxed),
            malformed_bodies: self.malformed_bodies.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub bodies_deserialized: u64,
    pub responses_serialized: u64,
    pub unsupported_media: u64,
    pub malformed_bodies: u64,
}
