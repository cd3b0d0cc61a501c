use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use governor::Quota;
use std::{net::SocketAddr, num::NonZeroU32, time::Duration};
use tower_http::cors::CorsLayer;

use crate::{
    errors::AppError,
    throttle::{Window, retry_after_secs},
};

pub type IpRateLimiter = Window;

pub fn create_global_rate_limiter(per_minute: NonZeroU32) -> IpRateLimiter {
    Window::with_quota(Quota::per_minute(per_minute))
}

/// Origin address of the request, `"unknown"` when the server was not given connect info.
pub fn client_ip(request_extensions: &axum::http::Extensions) -> String {
    request_extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// IP-based rate limiting in front of every route
pub async fn rate_limit_middleware(
    rate_limiter: IpRateLimiter,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client_ip = client_ip(request.extensions());

    match rate_limiter.check(&client_ip) {
        Ok(()) => Ok(next.run(request).await),
        Err(wait) => {
            tracing::warn!("Rate limit exceeded for IP: {}", client_ip);
            Err(AppError::RateLimited {
                retry_after_secs: retry_after_secs(wait),
            })
        }
    }
}

// CORS configuration using the configured origins
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed_origins = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect::<Vec<_>>();

    tracing::info!("CORS allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
