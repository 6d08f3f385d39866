//! Authentication endpoints: login, logout, current user, password change.

use crate::auth::rbac::{self, Module};
use crate::auth::AUTH_COOKIE;
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::AppState;
use crate::storage::database::entities::user;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_password, validate_required};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

/// Password change request
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
}

/// User info for API responses (never carries the password hash)
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&user::Model> for UserInfo {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    message: String,
    user: UserInfo,
}

/// Current-user response: identity plus the effective permission matrix,
/// so the admin UI renders from the same policy the API enforces.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    user: UserInfo,
    permissions: BTreeMap<&'static str, rbac::ModulePermissions>,
}

/// User login endpoint
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    info!("User login attempt: {}", request.username);

    validate_required("username", &request.username)?;
    validate_required("password", &request.password)?;

    let client_id = client_identifier(&req);
    if let Err(wait_seconds) = state.login_limiter.check_allowed(&client_id) {
        warn!("Login rate limited for client: {}", client_id);
        return Ok(HttpResponse::TooManyRequests().json(ApiResponse::<()>::error(format!(
            "Too many failed attempts. Try again in {} seconds",
            wait_seconds
        ))));
    }

    let (user, token) = match state.auth.login(&request.username, &request.password).await {
        Ok(ok) => ok,
        Err(e @ AppError::Auth(_)) => {
            state.login_limiter.record_failure(&client_id);
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    state.login_limiter.record_success(&client_id);

    let cookie = session_cookie(&state, token);
    let response = LoginResponse {
        message: "Login successful".to_string(),
        user: UserInfo::from(&user),
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response)))
}

/// User logout endpoint: clears the session cookie. Always succeeds.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success("Logged out"))
}

/// Current-user endpoint
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse> {
    let role = user.role()?;

    let permissions = Module::ALL
        .iter()
        .map(|&module| (module.as_str(), rbac::module_permissions(role, module)))
        .collect();

    let response = MeResponse {
        user: UserInfo::from(&user.0),
        permissions,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Change the authenticated user's password
pub async fn change_password(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    validate_password(&request.new_password)?;

    state
        .auth
        .change_password(user.0.id, &request.current_password, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Password changed")))
}

/// Build the session cookie carrying the signed token.
fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(state.config.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(
            state.config.auth.jwt_expiration as i64,
        ))
        .finish()
}

/// Identify the client for login rate limiting.
fn client_identifier(req: &HttpRequest) -> String {
    req.connection_info()
        .peer_addr()
        .map(|addr| format!("ip:{}", addr))
        .unwrap_or_else(|| "ip:unknown".to_string())
}
