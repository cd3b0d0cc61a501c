mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_login_logout() {
    let app = TestApp::new();

    let registered = app
        .post(
            "/account/register",
            None,
            json!({
                "username": "testuser",
                "email": "testuser@eg.com",
                "password": "mypassword",
                "password2": "mypassword",
            }),
        )
        .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["username"], "testuser");
    let token = registered.body["token"].as_str().unwrap().to_string();

    let login = app
        .post(
            "/account/login",
            None,
            json!({"username": "testuser", "password": "mypassword"}),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body["token"].is_string());

    let logout = app.post("/account/logout", Some(&token), json!({})).await;
    assert_eq!(logout.status, StatusCode::OK);

    // The revoked token no longer authenticates
    let reused = app.get("/platforms", Some(&token)).await;
    assert_eq!(reused.status, StatusCode::UNAUTHORIZED);

    let fresh = login.body["token"].as_str().unwrap();
    assert_eq!(app.get("/platforms", Some(fresh)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_registration_conflicts() {
    let app = TestApp::new();
    app.user("taken", false).await;

    let response = app
        .post(
            "/account/register",
            None,
            json!({
                "username": "taken",
                "email": "taken@example.com",
                "password": "mypassword",
                "password2": "mypassword",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["username"].is_array());
    assert!(response.body["email"].is_array());

    let mismatch = app
        .post(
            "/account/register",
            None,
            json!({
                "username": "fresh",
                "email": "fresh@example.com",
                "password": "mypassword",
                "password2": "different",
            }),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.body["password"][0], "Passwords must match");
}

#[tokio::test]
async fn test_bad_credentials() {
    let app = TestApp::new();
    app.user("alice", false).await;

    let response = app
        .post(
            "/account/login",
            None,
            json!({"username": "alice", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["non_field_errors"].is_array());

    let unknown = app
        .post(
            "/account/login",
            None,
            json!({"username": "ghost", "password": "password123"}),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let ok = app
        .post(
            "/account/login",
            None,
            json!({"username": "alice", "password": "password123"}),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_identity() {
    let app = TestApp::new();
    let response = app.post("/account/logout", None, json!({})).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bootstrap_admin_is_staff_and_idempotent() {
    use watchlist_be::{bootstrap_admin, config::AdminBootstrap, db::Store};

    let app = TestApp::new();
    let admin = AdminBootstrap {
        username: "boss".into(),
        email: "boss@example.com".into(),
        password: "supersecret".into(),
    };
    bootstrap_admin(app.store.as_ref(), &admin).await.unwrap();
    bootstrap_admin(app.store.as_ref(), &admin).await.unwrap();

    let user = app.store.get_user_by_username("boss").await.unwrap().unwrap();
    assert!(user.is_staff);

    let login = app
        .post(
            "/account/login",
            None,
            json!({"username": "boss", "password": "supersecret"}),
        )
        .await;
    let token = login.body["token"].as_str().unwrap();
    let created = app
        .post(
            "/platforms",
            Some(token),
            json!({"name": "Hulu", "description": "tv", "website": "https://hulu.com"}),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
}
