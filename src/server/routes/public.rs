//! Public site endpoints: published news, approved testimonials and the
//! contact form. No authentication.

use crate::server::routes::{ApiResponse, PageQuery};
use crate::server::AppState;
use crate::storage::database::entities::{news, testimonial};
use crate::storage::database::{NewContactMessage, NewsStatus, TestimonialStatus};
use crate::utils::error::{AppError, Result};
use crate::utils::sanitize::sanitize_text;
use crate::utils::validation::{validate_email, validate_required};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Published article as listed on the public site (no body)
#[derive(Debug, Serialize)]
struct PublicNewsItem {
    title: String,
    slug: String,
    summary: Option<String>,
    image_key: Option<String>,
    published_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl From<&news::Model> for PublicNewsItem {
    fn from(article: &news::Model) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            summary: article.summary.clone(),
            image_key: article.image_key.clone(),
            published_at: article.published_at,
        }
    }
}

/// Full article as rendered on its public page
#[derive(Debug, Serialize)]
struct PublicNewsDetail {
    #[serde(flatten)]
    item: PublicNewsItem,
    body: String,
}

/// Approved testimonial as shown on the public site
#[derive(Debug, Serialize)]
struct PublicTestimonial {
    client_name: String,
    quote: String,
    rating: Option<i16>,
}

impl From<&testimonial::Model> for PublicTestimonial {
    fn from(testimonial: &testimonial::Model) -> Self {
        Self {
            client_name: testimonial.client_name.clone(),
            quote: testimonial.quote.clone(),
            rating: testimonial.rating,
        }
    }
}

/// Contact form submission
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
}

/// List published news, newest first
pub async fn list_news(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (page, per_page) = query.clamped();
    let articles = state.storage.db().list_published_news(page, per_page).await?;

    let items: Vec<PublicNewsItem> = articles.items.iter().map(PublicNewsItem::from).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}

/// Fetch one published article by slug
pub async fn get_news(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let article = state
        .storage
        .db()
        .find_news_by_slug(&path.into_inner())
        .await?
        .filter(|article| article.status == NewsStatus::Published.as_str())
        .ok_or_else(|| AppError::not_found("News article not found"))?;

    let detail = PublicNewsDetail {
        item: PublicNewsItem::from(&article),
        body: article.body.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}

/// List approved testimonials
pub async fn list_testimonials(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let (page, per_page) = query.clamped();
    let testimonials = state
        .storage
        .db()
        .list_testimonials(Some(TestimonialStatus::Approved), page, per_page)
        .await?;

    let items: Vec<PublicTestimonial> = testimonials
        .items
        .iter()
        .map(PublicTestimonial::from)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}

/// Accept a contact-form submission
pub async fn submit_contact(
    state: web::Data<AppState>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    validate_required("name", &request.name)?;
    validate_required("message", &request.message)?;
    validate_email(&request.email)?;

    let message = state
        .storage
        .db()
        .create_contact_message(NewContactMessage {
            name: sanitize_text(&request.name),
            email: request.email,
            subject: request.subject.map(|s| sanitize_text(&s)),
            message: sanitize_text(&request.message),
        })
        .await?;

    info!("Contact message received from {}", message.email);
    Ok(HttpResponse::Created().json(ApiResponse::success("Message received")))
}
