//! Contact message management endpoints.
//!
//! Messages are created by the public contact form; the admin side lists,
//! reads, archives and deletes them.

use crate::auth::rbac::{require_permission, Action, Module};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::{ApiResponse, StatusPageQuery};
use crate::server::AppState;
use crate::storage::database::MessageStatus;
use crate::utils::error::{AppError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure contact message routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/messages")
            .route("", web::get().to(list_messages))
            .route("/{id}", web::get().to(get_message))
            .route("/{id}/status", web::put().to(set_message_status))
            .route("/{id}", web::delete().to(delete_message)),
    );
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: String,
}

fn parse_status(status: &str) -> Result<MessageStatus> {
    status
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown message status: {}", status)))
}

async fn list_messages(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<StatusPageQuery>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Messages, Action::View)?;

    let status = match &query.status {
        Some(status) => Some(parse_status(status)?),
        None => None,
    };
    let (page, per_page) = query.clamped();
    let messages = state
        .storage
        .db()
        .list_messages(status, page, per_page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(messages)))
}

/// Fetch one message. Opening a new message marks it read.
async fn get_message(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Messages, Action::View)?;

    let id = path.into_inner();
    let message = state
        .storage
        .db()
        .find_message_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    let message = if message.status == MessageStatus::New.as_str() {
        state
            .storage
            .db()
            .set_message_status(id, MessageStatus::Read)
            .await?
    } else {
        message
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(message)))
}

async fn set_message_status(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<SetStatusRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Messages, Action::Edit)?;

    let status = parse_status(&request.status)?;
    let updated = state
        .storage
        .db()
        .set_message_status(path.into_inner(), status)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

async fn delete_message(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Messages, Action::Delete)?;

    state.storage.db().delete_message(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Message deleted")))
}
