pub mod aggregator;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod state;
pub mod throttle;
pub mod validation;

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use config::{AdminBootstrap, Config};
use db::{MemoryStore, PgStore, Store};
use errors::AppError;
use middleware::{cors_layer, rate_limit_middleware};
use models::NewUser;
use state::AppState;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;

/// The full application: routes, global limiter, CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let global_rate_limiter = state.global_limiter.clone();
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
}

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drops rate limiter keys that have fully recovered.
pub fn spawn_limiter_pruning(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            state.prune_limiters();
        }
    })
}

/// Creates the configured staff account unless the username is already taken.
pub async fn bootstrap_admin(store: &dyn Store, admin: &AdminBootstrap) -> Result<(), AppError> {
    if store.get_user_by_username(&admin.username).await?.is_some() {
        tracing::info!("Admin user {} already exists", admin.username);
        return Ok(());
    }

    let user = store
        .create_user(NewUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash: auth::hash_password(&admin.password)?,
            is_staff: true,
        })
        .await?;

    tracing::info!("Created admin user {} (ID: {})", user.username, user.id);
    Ok(())
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load()?;

    let store: Arc<dyn Store> = match config.database_url.as_deref() {
        Some(database_url) => Arc::new(PgStore::connect(database_url).await?),
        None => Arc::new(MemoryStore::new()),
    };

    if let Some(admin) = &config.admin {
        bootstrap_admin(store.as_ref(), admin).await?;
    }

    let port = config.port;
    let state = AppState::new(store, config);
    spawn_limiter_pruning(state.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {port}: {e}")))?;

    tracing::info!("Watchlist server running at http://127.0.0.1:{port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Server error: {}", e);
        AppError::InternalError
    })
}
