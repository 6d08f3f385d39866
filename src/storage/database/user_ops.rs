use crate::auth::rbac::Role;
use crate::utils::error::{AppError, Result};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::*;
use tracing::{debug, info};
use uuid::Uuid;

use super::entities::{self, user};
use super::{Database, Page};

/// Fields for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}

/// Optional fields for updating a user; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

impl Database {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        debug!("Finding user by ID: {}", user_id);

        entities::User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Find user by username
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by username: {}", username);

        entities::User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// List users, newest first
    pub async fn list_users(&self, page: u64, per_page: u64) -> Result<Page<user::Model>> {
        let paginator = entities::User::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(Page {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Create a new user
    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model> {
        debug!("Creating user: {}", new_user.username);

        if self
            .find_user_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username already exists"));
        }
        if self.find_user_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            display_name: Set(new_user.display_name),
            role: Set(new_user.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await.map_err(AppError::Database)?;
        info!("User created: {} ({})", created.username, created.role);
        Ok(created)
    }

    /// Update a user's profile and/or role
    pub async fn update_user(&self, user_id: Uuid, update: UserUpdate) -> Result<user::Model> {
        let user = self
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if let Some(email) = &update.email {
            if let Some(existing) = self.find_user_by_email(email).await? {
                if existing.id != user_id {
                    return Err(AppError::conflict("Email already exists"));
                }
            }
        }

        // Demoting the only administrator would lock everyone out, same as
        // deleting them
        if let Some(new_role) = update.role {
            if new_role != Role::Admin
                && user.parsed_role() == Some(Role::Admin)
                && self.count_admins().await? <= 1
            {
                return Err(AppError::validation(
                    "Cannot change the role of the last administrator",
                ));
            }
        }

        let mut active: user::ActiveModel = user.into();
        if let Some(email) = update.email {
            active.email = Set(email);
        }
        if let Some(display_name) = update.display_name {
            active.display_name = Set(display_name);
        }
        if let Some(role) = update.role {
            active.role = Set(role.to_string());
        }
        if let Some(password_hash) = update.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(AppError::Database)
    }

    /// Update user password
    pub async fn update_user_password(&self, user_id: Uuid, password_hash: &str) -> Result<()> {
        debug!("Updating password for user: {}", user_id);

        let user = self
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(AppError::Database)?;
        Ok(())
    }

    /// Delete a user.
    ///
    /// Deleting the last remaining administrator is rejected; the panel must
    /// always keep at least one account able to manage users.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let user = self
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.parsed_role() == Some(Role::Admin) && self.count_admins().await? <= 1 {
            return Err(AppError::validation("Cannot delete the last administrator"));
        }

        entities::User::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        info!("User deleted: {}", user.username);
        Ok(())
    }

    /// Total number of users
    pub async fn count_users(&self) -> Result<u64> {
        entities::User::find()
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Number of users with the admin role
    pub async fn count_admins(&self) -> Result<u64> {
        entities::User::find()
            .filter(user::Column::Role.eq(Role::Admin.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }
}
