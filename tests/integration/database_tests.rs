//! Database integration tests against in-memory SQLite.

use crate::common::{self, fixtures};
use lexfirm_rs::auth::Role;
use lexfirm_rs::storage::database::{
    MessageStatus, NewContactMessage, NewsStatus, NewsUpdate, TestimonialStatus, NewTestimonial,
    UserUpdate,
};
use lexfirm_rs::AppError;

#[tokio::test]
async fn test_database_health_check() {
    let (state, _uploads) = common::test_state().await;
    assert!(state.storage.db().health_check().await.is_ok());
}

#[tokio::test]
async fn test_user_create_and_find() {
    let (state, _uploads) = common::test_state().await;

    let created = fixtures::create_user(&state, "ana", Role::Editor).await;
    assert_eq!(created.role, "editor");

    let found = state
        .storage
        .db()
        .find_user_by_username("ana")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.email, "ana@example.com");

    let missing = state
        .storage
        .db()
        .find_user_by_email("nobody@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (state, _uploads) = common::test_state().await;

    fixtures::create_user(&state, "ana", Role::Editor).await;

    let err = state
        .storage
        .db()
        .create_user(lexfirm_rs::storage::database::NewUser {
            username: "ana".to_string(),
            email: "other@example.com".to_string(),
            display_name: "Other".to_string(),
            password_hash: "x".to_string(),
            role: Role::Editor,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_last_admin_cannot_be_deleted() {
    let (state, _uploads) = common::test_state().await;

    let admin = fixtures::create_user(&state, "root", Role::Admin).await;
    fixtures::create_user(&state, "ana", Role::Editor).await;

    let err = state.storage.db().delete_user(admin.id).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("last administrator"));

    // With a second admin present, deletion succeeds
    fixtures::create_user(&state, "root2", Role::Admin).await;
    assert!(state.storage.db().delete_user(admin.id).await.is_ok());
}

#[tokio::test]
async fn test_last_admin_cannot_be_demoted() {
    let (state, _uploads) = common::test_state().await;

    let admin = fixtures::create_user(&state, "root", Role::Admin).await;

    let err = state
        .storage
        .db()
        .update_user(
            admin.id,
            UserUpdate {
                role: Some(Role::Secretaria),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_news_slug_generation_and_collision() {
    let (state, _uploads) = common::test_state().await;
    let author = fixtures::create_user(&state, "root", Role::Admin).await;

    let first = fixtures::create_news(&state, "Test", NewsStatus::Draft, author.id).await;
    assert_eq!(first.slug, "test");

    let second = fixtures::create_news(&state, "Test", NewsStatus::Draft, author.id).await;
    assert_eq!(second.slug, "test-2");

    let third = fixtures::create_news(&state, "Test", NewsStatus::Draft, author.id).await;
    assert_eq!(third.slug, "test-3");

    let spanish =
        fixtures::create_news(&state, "Título con Ñ", NewsStatus::Draft, author.id).await;
    assert_eq!(spanish.slug, "titulo-con-n");
}

#[tokio::test]
async fn test_news_publish_stamps_published_at_once() {
    let (state, _uploads) = common::test_state().await;
    let author = fixtures::create_user(&state, "root", Role::Admin).await;

    let draft = fixtures::create_news(&state, "Opening", NewsStatus::Draft, author.id).await;
    assert!(draft.published_at.is_none());

    let published = state
        .storage
        .db()
        .update_news(
            draft.id,
            NewsUpdate {
                status: Some(NewsStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let stamp = published.published_at.expect("published_at should be set");

    // A later edit must not move the publication timestamp
    let edited = state
        .storage
        .db()
        .update_news(
            draft.id,
            NewsUpdate {
                body: Some("<p>edited</p>".to_string()),
                status: Some(NewsStatus::Published),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.published_at, Some(stamp));
}

#[tokio::test]
async fn test_published_listing_excludes_drafts() {
    let (state, _uploads) = common::test_state().await;
    let author = fixtures::create_user(&state, "root", Role::Admin).await;

    fixtures::create_news(&state, "Draft one", NewsStatus::Draft, author.id).await;
    fixtures::create_news(&state, "Public one", NewsStatus::Published, author.id).await;
    fixtures::create_news(&state, "Public two", NewsStatus::Published, author.id).await;

    let public = state.storage.db().list_published_news(1, 10).await.unwrap();
    assert_eq!(public.total, 2);
    assert!(public.items.iter().all(|a| a.status == "published"));

    let all = state.storage.db().list_news(None, 1, 10).await.unwrap();
    assert_eq!(all.total, 3);
}

#[tokio::test]
async fn test_contact_message_lifecycle() {
    let (state, _uploads) = common::test_state().await;

    let message = state
        .storage
        .db()
        .create_contact_message(NewContactMessage {
            name: "Carlos".to_string(),
            email: "carlos@example.com".to_string(),
            subject: None,
            message: "I need advice".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(message.status, "new");
    assert_eq!(state.storage.db().count_unread_messages().await.unwrap(), 1);

    let read = state
        .storage
        .db()
        .set_message_status(message.id, MessageStatus::Read)
        .await
        .unwrap();
    assert_eq!(read.status, "read");
    assert_eq!(state.storage.db().count_unread_messages().await.unwrap(), 0);

    state.storage.db().delete_message(message.id).await.unwrap();
    let err = state
        .storage
        .db()
        .set_message_status(message.id, MessageStatus::Archived)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_testimonial_status_filter() {
    let (state, _uploads) = common::test_state().await;

    for (name, status) in [
        ("A", TestimonialStatus::Pending),
        ("B", TestimonialStatus::Approved),
        ("C", TestimonialStatus::Approved),
    ] {
        state
            .storage
            .db()
            .create_testimonial(NewTestimonial {
                client_name: name.to_string(),
                quote: "Great counsel".to_string(),
                rating: Some(5),
                status,
            })
            .await
            .unwrap();
    }

    let approved = state
        .storage
        .db()
        .list_testimonials(Some(TestimonialStatus::Approved), 1, 10)
        .await
        .unwrap();
    assert_eq!(approved.total, 2);

    let pending = state
        .storage
        .db()
        .list_testimonials(Some(TestimonialStatus::Pending), 1, 10)
        .await
        .unwrap();
    assert_eq!(pending.total, 1);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let (state, _uploads) = common::test_state().await;
    let author = fixtures::create_user(&state, "root", Role::Admin).await;

    fixtures::create_news(&state, "Public", NewsStatus::Published, author.id).await;
    fixtures::create_news(&state, "Draft", NewsStatus::Draft, author.id).await;
    state
        .storage
        .db()
        .create_contact_message(NewContactMessage {
            name: "Carlos".to_string(),
            email: "carlos@example.com".to_string(),
            subject: None,
            message: "Hello".to_string(),
        })
        .await
        .unwrap();

    let stats = state.storage.db().dashboard_stats().await.unwrap();
    assert_eq!(stats.published_news, 1);
    assert_eq!(stats.draft_news, 1);
    assert_eq!(stats.unread_messages, 1);
    assert_eq!(stats.users, 1);
    assert_eq!(stats.documents, 0);
}
