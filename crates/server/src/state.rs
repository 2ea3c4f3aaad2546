use std::sync::Arc;
use convertify_core::{Config, Converter};

/// Shared application state
pub struct AppState {
    config: Config,
    converter: Arc<dyn Converter>,
}

impl AppState {
    pub fn new(config: Config, converter: Arc<dyn Converter>) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn converter(&self) -> &dyn Converter {
        self.converter.as_ref()
    }

    /// Largest accepted upload, in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.config.limits.max_upload_bytes
    }
}
