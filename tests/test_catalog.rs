mod common;

use axum::http::StatusCode;
use common::{TestApp, test_config};
use serde_json::json;
use watchlist_be::config::Config;

#[tokio::test]
async fn test_platform_reads_are_public() {
    let app = TestApp::new();
    let (_, admin) = app.user("admin", true).await;
    let platform_id = app.create_platform(&admin, "Netflix").await;

    let list = app.get("/platforms", None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body.as_array().unwrap().len(), 1);

    let detail = app.get(&format!("/platforms/{platform_id}"), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["name"], "Netflix");
    assert_eq!(detail.body["website"], "http://netflix.org");
}

#[tokio::test]
async fn test_platform_writes_need_staff() {
    let app = TestApp::new();
    let (_, member) = app.user("test", false).await;
    let body = json!({
        "name": "netflix",
        "about": "standard stream service",
        "website": "http://netfilx.com",
    });

    let as_member = app.post("/platforms", Some(&member), body.clone()).await;
    assert_eq!(as_member.status, StatusCode::FORBIDDEN);

    let anonymous = app.post("/platforms", None, body).await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);

    // Permission is decided before the body is looked at
    let malformed = app
        .request(axum::http::Method::POST, "/platforms", Some(&member), None)
        .await;
    assert_eq!(malformed.status, StatusCode::FORBIDDEN);

    assert!(app.get("/platforms", None).await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_platform_lifecycle() {
    let app = TestApp::new();
    let (_, admin) = app.user("admin", true).await;
    let (_, member) = app.user("member", false).await;
    let platform_id = app.create_platform(&admin, "Netflix").await;
    let uri = format!("/platforms/{platform_id}");

    let replaced = app
        .put(
            &uri,
            Some(&admin),
            json!({
                "name": "Prime Video",
                "description": "amazon streaming",
                "website": "https://primevideo.com",
            }),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["name"], "Prime Video");

    let denied = app
        .put(
            &uri,
            Some(&member),
            json!({"name": "x", "description": "y", "website": "http://z.com"}),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(app.delete(&uri, Some(&member)).await.status, StatusCode::FORBIDDEN);

    let deleted = app.delete(&uri, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(deleted.body, serde_json::Value::Null);

    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri, Some(&admin)).await.status, StatusCode::NOT_FOUND);
    let missing = app
        .put(
            &uri,
            Some(&admin),
            json!({"name": "x", "description": "y", "website": "http://z.com"}),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_platform_payload_returns_field_errors() {
    let app = TestApp::new();
    let (_, admin) = app.user("admin", true).await;

    let response = app
        .post(
            "/platforms",
            Some(&admin),
            json!({"name": "", "description": "ok", "website": "not a url"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["name"][0], "This field may not be blank.");
    assert_eq!(response.body["website"][0], "Enter a valid URL.");
    assert!(response.body.get("description").is_none());

    let not_json = app
        .request(axum::http::Method::POST, "/platforms", Some(&admin), None)
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_title_crud_and_aggregate_fields_are_read_only() {
    let app = TestApp::new();
    let (_, admin) = app.user("admin", true).await;
    let (_, member) = app.user("member", false).await;
    let platform_id = app.create_platform(&admin, "Netflix").await;

    let created = app
        .post(
            "/titles",
            Some(&admin),
            json!({
                "title": "the boy",
                "storyline": "the boy survived",
                "platform": platform_id,
                "avg_review": 4.5,
                "number_rating": 10,
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["avg_review"], 0.0);
    assert_eq!(created.body["number_rating"], 0);
    assert_eq!(created.body["active"], true);
    assert_eq!(created.body["platform"], platform_id);
    assert_eq!(created.body["platform_name"], "Netflix");
    let uri = format!("/titles/{}", created.body["id"]);

    let denied = app
        .post(
            "/titles",
            Some(&member),
            json!({"title": "the boy", "storyline": "grew up", "platform": platform_id}),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    assert_eq!(app.get("/titles", None).await.status, StatusCode::OK);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::OK);

    let updated = app
        .put(
            &uri,
            Some(&admin),
            json!({
                "title": "the boy returns",
                "storyline": "again",
                "platform": platform_id,
                "active": false,
            }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "the boy returns");
    assert_eq!(updated.body["active"], false);

    assert_eq!(app.delete(&uri, Some(&member)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.delete(&uri, Some(&admin)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_title_with_unknown_platform() {
    let app = TestApp::new();
    let (_, admin) = app.user("admin", true).await;

    let response = app
        .post(
            "/titles",
            Some(&admin),
            json!({"title": "orphan", "storyline": "none", "platform": 999}),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["platform"][0]
            .as_str()
            .unwrap()
            .contains("object does not exist")
    );
}

#[tokio::test]
async fn test_search_is_paginated() {
    let app = TestApp::with_config(Config {
        search_page_size: 2,
        ..test_config()
    });
    let (_, admin) = app.user("admin", true).await;
    let netflix = app.create_platform(&admin, "Netflix").await;
    let hulu = app.create_platform(&admin, "Hulu").await;

    app.create_title(&admin, netflix, "The Boy").await;
    app.create_title(&admin, netflix, "Boy Meets World").await;
    app.create_title(&admin, hulu, "Another boy").await;
    app.create_title(&admin, hulu, "Nothing here").await;

    let first = app.get("/titles/search?search=BOY", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["count"], 3);
    assert_eq!(first.body["next"], 2);
    assert_eq!(first.body["previous"], serde_json::Value::Null);
    assert_eq!(first.body["results"].as_array().unwrap().len(), 2);

    let second = app.get("/titles/search?search=BOY&page=2", None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["results"].as_array().unwrap().len(), 1);
    assert_eq!(second.body["next"], serde_json::Value::Null);
    assert_eq!(second.body["previous"], 1);

    let legacy = app.get("/titles/search?search=BOY&sheet=2", None).await;
    assert_eq!(legacy.status, StatusCode::OK);
    assert_eq!(legacy.body["previous"], 1);

    let beyond = app.get("/titles/search?search=BOY&page=3", None).await;
    assert_eq!(beyond.status, StatusCode::NOT_FOUND);

    // Platform names are searched, and every term must match
    let by_platform = app.get("/titles/search?search=hulu", None).await;
    assert_eq!(by_platform.body["count"], 2);
    let narrowed = app.get("/titles/search?search=hulu%20boy", None).await;
    assert_eq!(narrowed.body["count"], 1);
    assert_eq!(narrowed.body["results"][0]["title"], "Another boy");

    let everything = app.get("/titles/search", None).await;
    assert_eq!(everything.body["count"], 4);

    let none = app.get("/titles/search?search=zzz", None).await;
    assert_eq!(none.status, StatusCode::OK);
    assert_eq!(none.body["count"], 0);
}

#[tokio::test]
async fn test_deleting_platform_cascades() {
    let app = TestApp::new();
    let (_, admin) = app.user("admin", true).await;
    let (_, member) = app.user("member", false).await;
    let platform_id = app.create_platform(&admin, "Netflix").await;
    let title_id = app.create_title(&admin, platform_id, "the boy").await;

    let review = app
        .post(
            &format!("/titles/{title_id}/reviews"),
            Some(&member),
            json!({"rating": 4}),
        )
        .await;
    assert_eq!(review.status, StatusCode::CREATED);
    let review_uri = format!("/reviews/{}", review.body["id"]);

    let deleted = app
        .delete(&format!("/platforms/{platform_id}"), Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(
        app.get(&format!("/titles/{title_id}"), None).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.get(&review_uri, None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_token_is_rejected_even_for_reads() {
    let app = TestApp::new();
    let response = app.get("/platforms", Some("not-a-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_global_limit_renders_like_other_rate_limits() {
    let app = TestApp::with_config(Config {
        global_rate_per_minute: std::num::NonZeroU32::new(2).unwrap(),
        ..test_config()
    });

    assert_eq!(app.get("/platforms", None).await.status, StatusCode::OK);
    assert_eq!(app.get("/titles", None).await.status, StatusCode::OK);

    let limited = app.get("/platforms", None).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers.contains_key(axum::http::header::RETRY_AFTER));
    assert!(limited.body["error"].as_str().unwrap().contains("throttled"));
}
