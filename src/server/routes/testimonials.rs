//! Testimonial management endpoints.

use crate::auth::rbac::{require_permission, Action, Module};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::{ApiResponse, StatusPageQuery};
use crate::server::AppState;
use crate::storage::database::{NewTestimonial, TestimonialStatus, TestimonialUpdate};
use crate::utils::error::{AppError, Result};
use crate::utils::sanitize::sanitize_text;
use crate::utils::validation::validate_required;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure testimonial routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/testimonials")
            .route("", web::get().to(list_testimonials))
            .route("", web::post().to(create_testimonial))
            .route("/{id}", web::get().to(get_testimonial))
            .route("/{id}", web::put().to(update_testimonial))
            .route("/{id}", web::delete().to(delete_testimonial)),
    );
}

#[derive(Debug, Deserialize)]
struct CreateTestimonialRequest {
    client_name: String,
    quote: String,
    rating: Option<i16>,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Deserialize)]
struct UpdateTestimonialRequest {
    client_name: Option<String>,
    quote: Option<String>,
    rating: Option<i16>,
    status: Option<String>,
}

fn parse_status(status: &str) -> Result<TestimonialStatus> {
    status
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown testimonial status: {}", status)))
}

fn validate_rating(rating: Option<i16>) -> Result<()> {
    if let Some(rating) = rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }
    }
    Ok(())
}

async fn list_testimonials(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<StatusPageQuery>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Testimonials, Action::View)?;

    let status = match &query.status {
        Some(status) => Some(parse_status(status)?),
        None => None,
    };
    let (page, per_page) = query.clamped();
    let testimonials = state
        .storage
        .db()
        .list_testimonials(status, page, per_page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(testimonials)))
}

async fn get_testimonial(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Testimonials, Action::View)?;

    let testimonial = state
        .storage
        .db()
        .find_testimonial_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Testimonial not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(testimonial)))
}

async fn create_testimonial(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<CreateTestimonialRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Testimonials, Action::Create)?;

    let request = request.into_inner();
    validate_required("client_name", &request.client_name)?;
    validate_required("quote", &request.quote)?;
    validate_rating(request.rating)?;
    let status = parse_status(&request.status)?;

    let created = state
        .storage
        .db()
        .create_testimonial(NewTestimonial {
            client_name: sanitize_text(&request.client_name),
            quote: sanitize_text(&request.quote),
            rating: request.rating,
            status,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(created)))
}

async fn update_testimonial(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateTestimonialRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Testimonials, Action::Edit)?;

    let request = request.into_inner();
    validate_rating(request.rating)?;
    let status = match &request.status {
        Some(status) => Some(parse_status(status)?),
        None => None,
    };

    let updated = state
        .storage
        .db()
        .update_testimonial(
            path.into_inner(),
            TestimonialUpdate {
                client_name: request.client_name.map(|n| sanitize_text(&n)),
                quote: request.quote.map(|q| sanitize_text(&q)),
                rating: request.rating.map(Some),
                status,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

async fn delete_testimonial(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Testimonials, Action::Delete)?;

    state
        .storage
        .db()
        .delete_testimonial(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Testimonial deleted")))
}
