//! Dashboard statistics endpoint.

use crate::auth::rbac::{require_permission, Action, Module};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::ApiResponse;
use crate::server::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};

/// Configure stats routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(dashboard_stats));
}

async fn dashboard_stats(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Dashboard, Action::View)?;

    let stats = state.storage.db().dashboard_stats().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats)))
}
