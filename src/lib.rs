//! # lexfirm-rs
//!
//! Content management backend for a law-firm marketing site.
//!
//! The service exposes a public JSON API (published news, approved
//! testimonials, contact form) and an admin API protected by JWT cookie
//! authentication plus role-based access control. Content lives in a
//! relational database behind sea-orm; uploaded documents live on the local
//! filesystem.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use lexfirm_rs::config::Config;
//! use lexfirm_rs::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use server::HttpServer;
pub use utils::error::{AppError, Result};
