use std::sync::Arc;

use crate::config::Config;
use crate::media::MediaHandlers;
use crate::observability::Metrics;
use crate::resource::EchoResource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub media: Arc<MediaHandlers>,
    pub echo: Arc<EchoResource>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, media: MediaHandlers) -> Self {
        let media = Arc::new(media);
        Self {
            config: Arc::new(config),
            echo: Arc::new(EchoResource::new(Arc::clone(&media))),
            media,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
