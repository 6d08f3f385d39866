//! Cookie authentication for protected routes.
//!
//! `AuthenticatedUser` is the authentication half of the route guard: an
//! extractor that reads the session cookie, verifies the token and re-reads
//! the user row. Handlers that take it as a parameter never run for an
//! unauthenticated request; actix short-circuits with the extractor's 401.
//! The authorization half is a `require_permission` call at the top of the
//! handler body.
//!
//! Missing cookie, bad signature, expired token and deleted user all
//! produce the same generic 401.

use crate::auth::rbac::Role;
use crate::auth::AUTH_COOKIE;
use crate::server::AppState;
use crate::storage::database::entities::user;
use crate::utils::error::AppError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::LocalBoxFuture;
use tracing::debug;

/// The resolved identity of the requesting admin-panel user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub user::Model);

impl AuthenticatedUser {
    /// The user's role, parsed fail-closed: an unrecognized stored tag
    /// behaves like a role with no permissions at all.
    pub fn role(&self) -> Result<Role, AppError> {
        self.0
            .parsed_role()
            .ok_or_else(|| AppError::forbidden("Unrecognized role"))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = req.cookie(AUTH_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state = state
                .ok_or_else(|| AppError::internal("Application state is not configured"))?;

            let token = token.ok_or_else(|| {
                debug!("Request without session cookie");
                AppError::auth("Authentication required")
            })?;

            let user = state.auth.authenticate_token(&token).await?;
            Ok(AuthenticatedUser(user))
        })
    }
}
