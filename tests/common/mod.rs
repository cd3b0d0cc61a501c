#![allow(dead_code)]

use std::{num::NonZeroU32, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use watchlist_be::{
    auth::{generate_jwt, hash_password},
    build_router,
    config::{Config, WindowConfig},
    db::{MemoryStore, Store},
    models::{NewUser, User},
    state::AppState,
};

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn test_config() -> Config {
    Config {
        jwt_secret: SECRET.to_string(),
        ..Config::default()
    }
}

pub fn window(requests: u32) -> WindowConfig {
    WindowConfig {
        requests: NonZeroU32::new(requests).unwrap(),
        period: Duration::from_secs(60),
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn Store> = store.clone();
        let router = build_router(AppState::new(shared, config));
        Self { router, store }
    }

    /// Creates a user directly in the store and returns it with a fresh token.
    pub async fn user(&self, username: &str, is_staff: bool) -> (User, String) {
        let user = self
            .store
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: hash_password("password123").unwrap(),
                is_staff,
            })
            .await
            .unwrap();
        let token = generate_jwt(&user, SECRET, 24).unwrap();
        (user, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn create_platform(&self, admin_token: &str, name: &str) -> i64 {
        let response = self
            .post(
                "/platforms",
                Some(admin_token),
                serde_json::json!({
                    "name": name,
                    "description": "standard streaming",
                    "website": "http://netflix.org",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"].as_i64().unwrap()
    }

    pub async fn create_title(&self, admin_token: &str, platform_id: i64, title: &str) -> i64 {
        let response = self
            .post(
                "/titles",
                Some(admin_token),
                serde_json::json!({
                    "title": title,
                    "storyline": "a long story",
                    "platform": platform_id,
                    "active": true,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["id"].as_i64().unwrap()
    }
}
