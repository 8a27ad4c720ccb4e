use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::services::StorageService;

/// Shared, read-only state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    storage: Option<Arc<dyn StorageService>>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Option<Arc<dyn StorageService>>) -> Self {
        Self {
            config: Arc::new(config),
            storage,
        }
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    pub fn storage_opt(&self) -> Option<&Arc<dyn StorageService>> {
        self.storage.as_ref()
    }

    /// Storage for endpoints that cannot work without it
    pub fn storage(&self) -> Result<&Arc<dyn StorageService>, ApiError> {
        self.storage
            .as_ref()
            .ok_or_else(|| ApiError::service_unavailable("storage service unavailable"))
    }
}
