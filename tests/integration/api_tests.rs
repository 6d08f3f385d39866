//! HTTP surface tests: authentication, authorization and the public API,
//! driven through the full actix App.

use crate::common::{self, fixtures};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use lexfirm_rs::auth::Role;
use lexfirm_rs::server::routes;
use lexfirm_rs::storage::database::UserUpdate;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure_all),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "username": $username,
                "password": fixtures::TEST_PASSWORD,
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        resp.response()
            .cookies()
            .find(|c| c.name() == "admin-auth-token")
            .expect("login should set the session cookie")
            .into_owned()
    }};
}

#[tokio::test]
async fn test_protected_route_without_cookie_is_401() {
    let (state, _uploads) = common::test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin/news")
        .set_json(serde_json::json!({"title": "x", "body": "y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_bad_credentials_is_401() {
    let (state, _uploads) = common::test_state().await;
    fixtures::create_user(&state, "root", Role::Admin).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": "root", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Unknown username gets the same answer
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": "ghost", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_blank_fields_is_400() {
    let (state, _uploads) = common::test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": "", "password": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_sets_cookie_and_me_returns_permissions() {
    let (state, _uploads) = common::test_state().await;
    fixtures::create_user(&state, "root", Role::Admin).await;
    let app = init_app!(state);

    let cookie = login!(&app, "root");
    assert!(cookie.http_only().unwrap_or(false));
    assert_eq!(cookie.path(), Some("/"));

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert_eq!(body["data"]["permissions"]["users"]["delete"], true);
    assert_eq!(body["data"]["permissions"]["dashboard"]["view"], true);
}

#[tokio::test]
async fn test_editor_is_forbidden_from_user_management() {
    let (state, _uploads) = common::test_state().await;
    fixtures::create_user(&state, "ana", Role::Editor).await;
    let app = init_app!(state);

    let cookie = login!(&app, "ana");
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_list_users() {
    let (state, _uploads) = common::test_state().await;
    fixtures::create_user(&state, "root", Role::Admin).await;
    let app = init_app!(state);

    let cookie = login!(&app, "root");
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_deleting_last_admin_is_400() {
    let (state, _uploads) = common::test_state().await;
    let admin = fixtures::create_user(&state, "root", Role::Admin).await;
    let app = init_app!(state);

    let cookie = login!(&app, "root");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/users/{}", admin.id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("last administrator")
    );
}

#[tokio::test]
async fn test_role_change_applies_to_outstanding_tokens() {
    let (state, _uploads) = common::test_state().await;
    let editor = fixtures::create_user(&state, "ana", Role::Editor).await;
    let app = init_app!(state);

    let cookie = login!(&app, "ana");

    // Forbidden while the stored role is editor
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // Promote the user; the token still says "editor" but the gate re-reads
    // the row, so the same cookie now passes
    state
        .storage
        .db()
        .update_user(
            editor.id,
            UserUpdate {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_news_create_generates_slug_and_sanitizes() {
    let (state, _uploads) = common::test_state().await;
    fixtures::create_user(&state, "root", Role::Admin).await;
    let app = init_app!(state);

    let cookie = login!(&app, "root");
    let req = test::TestRequest::post()
        .uri("/api/admin/news")
        .cookie(cookie)
        .set_json(serde_json::json!({
            "title": "Test",
            "body": "<p>fine</p><script>alert('x')</script>",
            "status": "published",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["slug"], "test");
    let stored_body = body["data"]["body"].as_str().unwrap();
    assert!(stored_body.contains("<p>fine</p>"));
    assert!(!stored_body.contains("script"));
}

#[tokio::test]
async fn test_public_news_detail_hides_drafts() {
    let (state, _uploads) = common::test_state().await;
    let author = fixtures::create_user(&state, "root", Role::Admin).await;
    fixtures::create_news(
        &state,
        "Hidden draft",
        lexfirm_rs::storage::database::NewsStatus::Draft,
        author.id,
    )
    .await;
    fixtures::create_news(
        &state,
        "Visible",
        lexfirm_rs::storage::database::NewsStatus::Published,
        author.id,
    )
    .await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/public/news/hidden-draft")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri("/api/public/news/visible")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Visible");

    // Listing only shows the published article
    let req = test::TestRequest::get().uri("/api/public/news").to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_contact_form_round_trip() {
    let (state, _uploads) = common::test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/public/contact")
        .set_json(serde_json::json!({
            "name": "Carlos",
            "email": "carlos@example.com",
            "message": "I need advice",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert_eq!(state.storage.db().count_unread_messages().await.unwrap(), 1);

    // Missing email is a validation error
    let req = test::TestRequest::post()
        .uri("/api/public/contact")
        .set_json(serde_json::json!({"name": "Carlos", "email": "", "message": "hi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (state, _uploads) = common::test_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "admin-auth-token")
        .expect("logout should send a removal cookie");
    assert_eq!(cookie.value(), "");
}
