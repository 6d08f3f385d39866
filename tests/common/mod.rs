//! Common test utilities for lexfirm-rs

pub mod fixtures;

use lexfirm_rs::auth::AuthSystem;
use lexfirm_rs::config::{
    AuthConfig, BootstrapConfig, Config, DatabaseConfig, ServerConfig, UploadsConfig,
};
use lexfirm_rs::server::middleware::auth_rate_limiter::InMemoryAttemptStore;
use lexfirm_rs::server::AppState;
use lexfirm_rs::storage::StorageLayer;
use std::sync::Arc;
use tempfile::TempDir;

/// Application state backed by in-memory SQLite and a temporary uploads
/// directory. Keep the returned `TempDir` alive for the duration of the
/// test.
pub async fn test_state() -> (AppState, TempDir) {
    let uploads_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config = Config {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret-test-secret-test-secret!".to_string(),
            jwt_expiration: 8 * 60 * 60,
            cookie_secure: false,
        },
        uploads: UploadsConfig {
            dir: uploads_dir.path().to_string_lossy().into_owned(),
            max_size_bytes: 1024 * 1024,
        },
        bootstrap: BootstrapConfig::default(),
        production: false,
    };

    let storage = StorageLayer::new(&config)
        .await
        .expect("Failed to initialize storage");
    let auth = AuthSystem::new(&config.auth, storage.database.clone());
    let login_limiter = Arc::new(InMemoryAttemptStore::default());

    let state = AppState::new(config, auth, storage, login_limiter);
    (state, uploads_dir)
}
