//! Configuration management for the backend.
//!
//! All configuration comes from environment variables (optionally via a
//! `.env` file loaded in `main`). Every struct carries sensible development
//! defaults; `validate` is called once at startup and refuses to boot a
//! production process with a weak or placeholder JWT secret.

use crate::utils::error::{AppError, Result};
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

/// Default session lifetime: 8 hours, matching the auth cookie max-age.
const DEFAULT_JWT_EXPIRATION: u64 = 8 * 60 * 60;

/// Placeholder secrets that must never reach production.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me", "your-secret-key", "secret", "dev-secret"];

/// Random signing secret for development processes started without one.
fn generate_dev_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Main configuration struct for the backend
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Uploaded-file storage configuration
    pub uploads: UploadsConfig,
    /// First-run administrator bootstrap
    pub bootstrap: BootstrapConfig,
    /// Whether the process runs in production mode
    pub production: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of worker threads (actix default when unset)
    pub workers: Option<usize>,
    /// Origin allowed to call the API from a browser; unset means
    /// same-origin only
    pub cors_allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            cors_allowed_origin: None,
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (postgres://... or sqlite://...)
    pub url: String,
    /// Maximum pool connections
    pub max_connections: u32,
    /// Connect timeout in seconds
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/lexfirm.db?mode=rwc".to_string(),
            max_connections: 10,
            connection_timeout: 5,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration: u64,
    /// Whether the auth cookie carries the Secure attribute
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expiration: DEFAULT_JWT_EXPIRATION,
            cookie_secure: false,
        }
    }
}

/// Uploaded-file storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Directory documents are stored under
    pub dir: String,
    /// Maximum accepted upload size in bytes
    pub max_size_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "data/uploads".to_string(),
            max_size_bytes: 20 * 1024 * 1024,
        }
    }
}

/// First-run administrator bootstrap configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Administrator login name
    pub admin_username: Option<String>,
    /// Administrator email
    pub admin_email: Option<String>,
    /// Administrator initial password
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let mut server = ServerConfig::default();
        if let Ok(host) = env::var("SERVER_HOST") {
            server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            server.port = port
                .parse()
                .map_err(|e| AppError::config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(workers) = env::var("SERVER_WORKERS") {
            server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| AppError::config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Ok(origin) = env::var("CORS_ALLOWED_ORIGIN") {
            server.cors_allowed_origin = Some(origin);
        }

        let mut database = DatabaseConfig::default();
        if let Ok(url) = env::var("DATABASE_URL") {
            database.url = url;
        }
        if let Ok(max_conn) = env::var("DATABASE_MAX_CONNECTIONS") {
            database.max_connections = max_conn
                .parse()
                .map_err(|e| AppError::config(format!("Invalid max connections: {}", e)))?;
        }
        if let Ok(timeout) = env::var("DATABASE_CONNECT_TIMEOUT") {
            database.connection_timeout = timeout
                .parse()
                .map_err(|e| AppError::config(format!("Invalid connect timeout: {}", e)))?;
        }

        let mut auth = AuthConfig {
            cookie_secure: production,
            ..AuthConfig::default()
        };
        match env::var("JWT_SECRET") {
            Ok(secret) => auth.jwt_secret = secret,
            Err(_) if !production => {
                // Sessions will not survive a restart, which is fine for a
                // development checkout
                warn!("JWT_SECRET is unset; generated a random development secret");
                auth.jwt_secret = generate_dev_secret();
            }
            Err(_) => {}
        }
        if let Ok(exp) = env::var("JWT_EXPIRATION") {
            auth.jwt_expiration = exp
                .parse()
                .map_err(|e| AppError::config(format!("Invalid JWT expiration: {}", e)))?;
        }

        let mut uploads = UploadsConfig::default();
        if let Ok(dir) = env::var("UPLOADS_DIR") {
            uploads.dir = dir;
        }
        if let Ok(max) = env::var("UPLOADS_MAX_SIZE") {
            uploads.max_size_bytes = max
                .parse()
                .map_err(|e| AppError::config(format!("Invalid upload size limit: {}", e)))?;
        }

        let bootstrap = BootstrapConfig {
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        };

        let config = Self {
            server,
            database,
            auth,
            uploads,
            bootstrap,
            production,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, refusing to boot on unsafe values.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if self.auth.jwt_expiration == 0 {
            return Err(AppError::config("JWT_EXPIRATION must be greater than zero"));
        }

        let secret = &self.auth.jwt_secret;
        let weak = secret.len() < 32
            || PLACEHOLDER_SECRETS
                .iter()
                .any(|p| secret.eq_ignore_ascii_case(p));

        if weak {
            if self.production {
                return Err(AppError::config(
                    "JWT_SECRET must be set to a random value of at least 32 characters in production",
                ));
            }
            warn!(
                "JWT_SECRET is missing or weak; sessions will not survive scrutiny. \
                 Set a random value of at least 32 characters before deploying."
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_config(production: bool) -> Config {
        Config {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
                jwt_expiration: DEFAULT_JWT_EXPIRATION,
                cookie_secure: production,
            },
            uploads: UploadsConfig::default(),
            bootstrap: BootstrapConfig::default(),
            production,
        }
    }

    #[test]
    fn test_strong_secret_passes() {
        assert!(strong_config(true).validate().is_ok());
    }

    #[test]
    fn test_weak_secret_rejected_in_production() {
        let mut config = strong_config(true);
        config.auth.jwt_secret = "change-me".to_string();
        assert!(config.validate().is_err());

        config.auth.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_weak_secret_tolerated_in_development() {
        let mut config = strong_config(false);
        config.auth.jwt_secret = "dev-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_expiration_rejected() {
        let mut config = strong_config(false);
        config.auth.jwt_expiration = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_expiration_is_eight_hours() {
        assert_eq!(AuthConfig::default().jwt_expiration, 28800);
    }
}
