//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::ClientRepository;
use crate::services::ClientService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance, kept for health checks
    pub repository: Arc<dyn ClientRepository>,
    /// Business logic layer
    pub service: ClientService,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        let service = ClientService::new(Arc::clone(&repository));
        Self {
            repository,
            service,
        }
    }
}
