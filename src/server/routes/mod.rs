//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod auth;
pub mod documents;
pub mod health;
pub mod messages;
pub mod news;
pub mod public;
pub mod stats;
pub mod testimonials;
pub mod users;

use actix_web::web;
use serde::Deserialize;

/// Register every route of the service.
///
/// The admin resources live under `/api/admin` and are individually guarded;
/// `/api/auth` and `/api/public` carry their own access rules.
pub fn configure_all(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/auth")
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .route("/me", web::get().to(auth::me))
                .route("/change-password", web::post().to(auth::change_password)),
        )
        .service(
            web::scope("/api/admin")
                .configure(news::configure_routes)
                .configure(testimonials::configure_routes)
                .configure(messages::configure_routes)
                .configure(users::configure_routes)
                .configure(documents::configure_routes)
                .configure(stats::configure_routes),
        )
        .service(
            web::scope("/api/public")
                .route("/news", web::get().to(public::list_news))
                .route("/news/{slug}", web::get().to(public::get_news))
                .route("/testimonials", web::get().to(public::list_testimonials))
                .route("/contact", web::post().to(public::submit_contact)),
        );
}

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Pagination query parameters shared by every listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

/// Pagination plus a status filter, for the moderated listings
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub status: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

impl PageQuery {
    /// Clamp to sane bounds before hitting the database
    pub fn clamped(&self) -> (u64, u64) {
        clamp_page(self.page, self.per_page)
    }
}

impl StatusPageQuery {
    /// Clamp to sane bounds before hitting the database
    pub fn clamped(&self) -> (u64, u64) {
        clamp_page(self.page, self.per_page)
    }
}

fn clamp_page(page: u64, per_page: u64) -> (u64, u64) {
    (page.max(1), per_page.clamp(1, 100))
}
