use crate::config::DatabaseConfig;
use crate::utils::error::{AppError, Result};
use sea_orm::{ConnectOptions, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{info, warn};

use super::migration::Migrator;
use super::{Database, DatabaseBackendType};

impl Database {
    /// Create a new database connection with automatic SQLite fallback
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        match Self::try_connect(&config.url, config).await {
            Ok(db) => {
                let backend_type = if config.url.starts_with("sqlite") {
                    DatabaseBackendType::SQLite
                } else {
                    DatabaseBackendType::PostgreSQL
                };
                info!("Database connection established ({:?})", backend_type);
                Ok(Self { db, backend_type })
            }
            Err(e) => {
                // If PostgreSQL is unreachable, fall back to a local SQLite
                // file so a development checkout still boots
                if config.url.starts_with("postgresql://") || config.url.starts_with("postgres://")
                {
                    warn!(
                        "PostgreSQL connection failed: {}. Attempting SQLite fallback...",
                        e
                    );
                    Self::fallback_to_sqlite().await
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Try to connect to a database
    async fn try_connect(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        sea_orm::Database::connect(opt)
            .await
            .map_err(AppError::Database)
    }

    /// Fallback to SQLite database
    async fn fallback_to_sqlite() -> Result<Self> {
        let data_dir = std::path::Path::new("data");
        if !data_dir.exists() {
            std::fs::create_dir_all(data_dir).map_err(|e| {
                AppError::internal(format!("Failed to create data directory: {}", e))
            })?;
        }

        let sqlite_path = "sqlite://data/lexfirm.db?mode=rwc";
        info!("Falling back to SQLite database: {}", sqlite_path);

        let config = DatabaseConfig {
            url: sqlite_path.to_string(),
            max_connections: 5,
            connection_timeout: 5,
        };
        let db = Self::try_connect(sqlite_path, &config).await?;

        Ok(Self {
            db,
            backend_type: DatabaseBackendType::SQLite,
        })
    }

    /// Run pending migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");
        Migrator::up(&self.db, None)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    /// Check the connection is alive
    pub async fn health_check(&self) -> Result<()> {
        self.db.ping().await.map_err(AppError::Database)
    }

    /// Which backend the pool is connected to
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }
}
