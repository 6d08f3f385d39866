//! User management endpoints (admin only by policy).

use crate::auth::password::hash_password;
use crate::auth::rbac::{require_permission, Action, Module, Role};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::{ApiResponse, PageQuery};
use crate::server::AppState;
use crate::storage::database::{NewUser, UserUpdate};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_email, validate_password, validate_required};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Configure user management routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

/// User creation request
#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    username: String,
    email: String,
    display_name: String,
    password: String,
    role: Role,
}

/// User update request; omitted fields are left unchanged
#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    email: Option<String>,
    display_name: Option<String>,
    role: Option<Role>,
    password: Option<String>,
}

async fn list_users(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Users, Action::View)?;

    let (page, per_page) = query.clamped();
    let users = state.storage.db().list_users(page, per_page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

async fn get_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Users, Action::View)?;

    let found = state
        .storage
        .db()
        .find_user_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(found)))
}

async fn create_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Users, Action::Create)?;

    let request = request.into_inner();
    validate_required("username", &request.username)?;
    validate_required("display_name", &request.display_name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let password_hash = hash_password(&request.password)?;
    let created = state
        .storage
        .db()
        .create_user(NewUser {
            username: request.username,
            email: request.email,
            display_name: request.display_name,
            password_hash,
            role: request.role,
        })
        .await?;

    info!("User created by {}: {}", user.0.username, created.username);
    Ok(HttpResponse::Created().json(ApiResponse::success(created)))
}

async fn update_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Users, Action::Edit)?;

    let request = request.into_inner();
    if let Some(email) = &request.email {
        validate_email(email)?;
    }
    let password_hash = match &request.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let updated = state
        .storage
        .db()
        .update_user(
            path.into_inner(),
            UserUpdate {
                email: request.email,
                display_name: request.display_name,
                role: request.role,
                password_hash,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

async fn delete_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Users, Action::Delete)?;

    let target_id = path.into_inner();
    state.storage.db().delete_user(target_id).await?;

    info!("User {} deleted by {}", target_id, user.0.username);
    Ok(HttpResponse::Ok().json(ApiResponse::success("User deleted")))
}
