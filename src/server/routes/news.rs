//! News article management endpoints.

use crate::auth::rbac::{require_permission, Action, Module};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::{ApiResponse, StatusPageQuery};
use crate::server::AppState;
use crate::storage::database::{NewNews, NewsStatus, NewsUpdate};
use crate::utils::error::{AppError, Result};
use crate::utils::sanitize::{sanitize_html, sanitize_text};
use crate::utils::validation::validate_required;
use actix_web::{HttpResponse, web};
use base64::Engine;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Configure news routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/news")
            .route("", web::get().to(list_news))
            .route("", web::post().to(create_news))
            .route("/{id}", web::get().to(get_news))
            .route("/{id}", web::put().to(update_news))
            .route("/{id}", web::delete().to(delete_news)),
    );
}

/// Article creation request
#[derive(Debug, Deserialize)]
struct CreateNewsRequest {
    title: String,
    summary: Option<String>,
    body: String,
    #[serde(default = "default_status")]
    status: String,
    /// Optional base64-encoded cover image
    image_data: Option<String>,
}

fn default_status() -> String {
    "draft".to_string()
}

/// Article update request; omitted fields are left unchanged
#[derive(Debug, Deserialize)]
struct UpdateNewsRequest {
    title: Option<String>,
    summary: Option<String>,
    body: Option<String>,
    status: Option<String>,
    image_data: Option<String>,
}

fn parse_status(status: &str) -> Result<NewsStatus> {
    status
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown news status: {}", status)))
}

/// Decode and store a cover image, best effort: a bad payload or a storage
/// failure logs a warning and the article is saved without the image.
async fn store_image(state: &AppState, image_data: &str) -> Option<String> {
    let bytes = match base64::engine::general_purpose::STANDARD.decode(image_data) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Ignoring undecodable cover image: {}", e);
            return None;
        }
    };

    match state.storage.files.store(&bytes).await {
        Ok(key) => Some(key),
        Err(e) => {
            warn!("Cover image storage failed, saving article without it: {}", e);
            None
        }
    }
}

async fn list_news(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<StatusPageQuery>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::News, Action::View)?;

    let status = match &query.status {
        Some(status) => Some(parse_status(status)?),
        None => None,
    };
    let (page, per_page) = query.clamped();
    let articles = state.storage.db().list_news(status, page, per_page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(articles)))
}

async fn get_news(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::News, Action::View)?;

    let article = state
        .storage
        .db()
        .find_news_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("News article not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(article)))
}

async fn create_news(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<CreateNewsRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::News, Action::Create)?;

    let request = request.into_inner();
    validate_required("title", &request.title)?;
    validate_required("body", &request.body)?;
    let status = parse_status(&request.status)?;

    let image_key = match &request.image_data {
        Some(data) => store_image(&state, data).await,
        None => None,
    };

    let created = state
        .storage
        .db()
        .create_news(NewNews {
            title: request.title,
            summary: request.summary.map(|s| sanitize_text(&s)),
            body: sanitize_html(&request.body),
            image_key,
            status,
            author_id: user.0.id,
        })
        .await?;

    info!("News article {} created by {}", created.slug, user.0.username);
    Ok(HttpResponse::Created().json(ApiResponse::success(created)))
}

async fn update_news(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateNewsRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::News, Action::Edit)?;

    let request = request.into_inner();
    let status = match &request.status {
        Some(status) => Some(parse_status(status)?),
        None => None,
    };

    let image_key = match &request.image_data {
        Some(data) => store_image(&state, data).await.map(Some),
        None => None,
    };

    let updated = state
        .storage
        .db()
        .update_news(
            path.into_inner(),
            NewsUpdate {
                title: request.title,
                summary: request.summary.map(|s| Some(sanitize_text(&s))),
                body: request.body.map(|b| sanitize_html(&b)),
                image_key,
                status,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

async fn delete_news(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::News, Action::Delete)?;

    let id = path.into_inner();
    let article = state.storage.db().find_news_by_id(id).await?;

    state.storage.db().delete_news(id).await?;

    // Removing the cover image is best effort; the article row is gone
    if let Some(image_key) = article.and_then(|a| a.image_key) {
        if let Err(e) = state.storage.files.delete(&image_key).await {
            warn!("Failed to delete cover image {}: {}", image_key, e);
        }
    }

    info!("News article {} deleted by {}", id, user.0.username);
    Ok(HttpResponse::Ok().json(ApiResponse::success("News article deleted")))
}
