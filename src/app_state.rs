use crate::config::SieveConfig;
use crate::service::PredictionService;
use std::sync::Arc;

/// Shared state handed to every request handler.
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub config: SieveConfig,
}

impl AppState {
    pub fn new(service: PredictionService, config: SieveConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}
