//! Application state shared across HTTP handlers.

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::server::middleware::auth_rate_limiter::AttemptStore;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap cloning into worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer (database + files)
    pub storage: Arc<StorageLayer>,
    /// Login brute-force protection
    pub login_limiter: Arc<dyn AttemptStore>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: AuthSystem,
        storage: StorageLayer,
        login_limiter: Arc<dyn AttemptStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage: Arc::new(storage),
            login_limiter,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
