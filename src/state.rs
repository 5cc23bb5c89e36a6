use std::sync::Arc;

use crate::gateway::ManagementGateway;

/// Origin tag written into error bodies unless configured otherwise.
pub const DEFAULT_ERROR_SOURCE: &str = env!("CARGO_PKG_NAME");

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ManagementGateway>,
    pub error_source: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ManagementGateway>) -> Self {
        Self {
            gateway,
            error_source: Arc::from(DEFAULT_ERROR_SOURCE),
        }
    }

    pub fn with_error_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.error_source = source.into();
        self
    }
}
