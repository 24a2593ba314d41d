use std::net::SocketAddr;

use axum::{Router, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    services::{echo, health, media_types},
    state::AppState,
};
use crate::config::Config;
use crate::media::MediaHandlers;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the application router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/echo", post(echo))
        .route("/media-types", get(media_types))
        .route("/health", get(health))
        .with_state(state)
        // Decompress gzip request bodies before they reach the media layer,
        // so handlers only ever see plain bytes
        .layer(RequestDecompressionLayer::new())
}

pub async fn run(address: SocketAddr) -> Result<(), AnyError> {
    info!("Loading configuration");
    let config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    let media = MediaHandlers::from_config(&config.media)
        .map_err(|e| format!("Failed to build media registry: {}", e))?;
    info!(
        default_media_type = %media.default_media_type(),
        media_types = media.media_types().count(),
        "Media registry ready"
    );

    let state = AppState::new(config, media);
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "mediabox API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
