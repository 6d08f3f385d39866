//! Fixture factories for integration tests.

use lexfirm_rs::auth::password::hash_password;
use lexfirm_rs::auth::Role;
use lexfirm_rs::server::AppState;
use lexfirm_rs::storage::database::entities::user;
use lexfirm_rs::storage::database::{NewNews, NewUser, NewsStatus};
use uuid::Uuid;

/// Password every fixture user logs in with.
pub const TEST_PASSWORD: &str = "password123";

/// Create a user with the given name and role.
pub async fn create_user(state: &AppState, username: &str, role: Role) -> user::Model {
    state
        .storage
        .db()
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            display_name: format!("Test {}", username),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role,
        })
        .await
        .expect("Failed to create fixture user")
}

/// Create a news article with the given title and status.
pub async fn create_news(
    state: &AppState,
    title: &str,
    status: NewsStatus,
    author_id: Uuid,
) -> lexfirm_rs::storage::database::entities::news::Model {
    state
        .storage
        .db()
        .create_news(NewNews {
            title: title.to_string(),
            summary: None,
            body: "<p>body</p>".to_string(),
            image_key: None,
            status,
            author_id,
        })
        .await
        .expect("Failed to create fixture article")
}
