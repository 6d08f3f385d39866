//! Authentication and authorization for the admin panel.
//!
//! `AuthSystem` owns the credential flows: login, cookie-token
//! authentication, password changes and first-run admin bootstrap. The
//! permission policy itself lives in [`rbac`].

pub mod jwt;
pub mod password;
pub mod rbac;

pub use rbac::{Action, Module, Role};

use crate::config::{AuthConfig, BootstrapConfig};
use crate::storage::database::entities::user;
use crate::storage::database::{Database, NewUser};
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Name of the session cookie carried by the admin panel.
pub const AUTH_COOKIE: &str = "admin-auth-token";

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// User store
    db: Arc<Database>,
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, db: Arc<Database>) -> Self {
        let config = Arc::new(config.clone());
        let jwt = Arc::new(jwt::JwtHandler::new(&config));

        Self { config, db, jwt }
    }

    /// Get the JWT handler
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }

    /// Get the auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown username and wrong password produce the same error so the
    /// endpoint cannot be used as a username oracle.
    pub async fn login(&self, username: &str, password_input: &str) -> Result<(user::Model, String)> {
        let user = match self.db.find_user_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt with unknown username: {}", username);
                return Err(AppError::auth("Invalid credentials"));
            }
        };

        let password_valid = password::verify_password(password_input, &user.password_hash)?;
        if !password_valid {
            warn!("Login attempt with invalid password for user: {}", username);
            return Err(AppError::auth("Invalid credentials"));
        }

        let token = self.jwt.issue(user.id, &user.role)?;
        info!("User logged in successfully: {}", user.username);

        Ok((user, token))
    }

    /// Resolve a session token to the current user record.
    ///
    /// The user row is re-read on every call, so a role edit takes effect on
    /// the next request even though outstanding tokens still carry the old
    /// role, and a deleted user resolves to unauthenticated.
    pub async fn authenticate_token(&self, token: &str) -> Result<user::Model> {
        let claims = self.jwt.verify(token)?;

        let user = self
            .db
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::auth("Unknown user"))?;

        debug!("Authenticated user: {}", user.username);
        Ok(user)
    }

    /// Change a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self
            .db
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !password::verify_password(current_password, &user.password_hash)? {
            return Err(AppError::auth("Invalid current password"));
        }

        let new_hash = password::hash_password(new_password)?;
        self.db.update_user_password(user_id, &new_hash).await?;

        info!("Password changed for user: {}", user.username);
        Ok(())
    }

    /// Create the first administrator account when the user table is empty.
    ///
    /// Without `ADMIN_EMAIL`/`ADMIN_PASSWORD` the step is skipped with a
    /// warning; the panel is unusable until an admin exists.
    pub async fn bootstrap_admin(&self, bootstrap: &BootstrapConfig) -> Result<()> {
        if self.db.count_users().await? > 0 {
            return Ok(());
        }

        let (Some(email), Some(password_input)) =
            (&bootstrap.admin_email, &bootstrap.admin_password)
        else {
            warn!(
                "User table is empty and ADMIN_EMAIL/ADMIN_PASSWORD are unset; \
                 no administrator account was created"
            );
            return Ok(());
        };

        let username = bootstrap
            .admin_username
            .clone()
            .or_else(|| email.split('@').next().map(str::to_string))
            .unwrap_or_else(|| "admin".to_string());

        let password_hash = password::hash_password(password_input)?;
        let admin = self
            .db
            .create_user(NewUser {
                username: username.clone(),
                email: email.clone(),
                display_name: "Administrator".to_string(),
                password_hash,
                role: Role::Admin,
            })
            .await?;

        info!("Bootstrap administrator created: {} <{}>", admin.username, admin.email);
        Ok(())
    }
}
