//! Storage layer: relational database plus local document storage.

pub mod database;
pub mod files;

use crate::config::Config;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Main storage layer that orchestrates all storage backends
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
    /// Document file storage
    pub files: Arc<files::LocalStorage>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Initializing storage layer");

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);
        database.migrate().await?;

        let files = Arc::new(files::LocalStorage::new(&config.uploads.dir).await?);

        Ok(Self { database, files })
    }

    /// Get the database handle
    pub fn db(&self) -> &database::Database {
        &self.database
    }
}
