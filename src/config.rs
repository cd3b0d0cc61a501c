use std::{env, fmt::Display, num::NonZeroU32, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::errors::AppError;

const REVIEW_LIST_RATE: NonZeroU32 = NonZeroU32::new(60).unwrap();
const REVIEW_CREATE_RATE: NonZeroU32 = NonZeroU32::new(5).unwrap();
const GLOBAL_RATE: NonZeroU32 = NonZeroU32::new(1000).unwrap();

/// Bound of a rolling window: at most `requests` within `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub requests: NonZeroU32,
    pub period: Duration,
}

impl WindowConfig {
    pub fn per_minute(requests: NonZeroU32) -> Self {
        Self {
            requests,
            period: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub allowed_origins: Vec<String>,
    pub search_page_size: u32,
    pub review_list_window: WindowConfig,
    pub review_create_window: WindowConfig,
    pub global_rate_per_minute: NonZeroU32,
    pub admin: Option<AdminBootstrap>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            database_url: None,
            jwt_secret: String::new(),
            token_ttl_hours: 24,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            search_page_size: 5,
            review_list_window: WindowConfig::per_minute(REVIEW_LIST_RATE),
            review_create_window: WindowConfig::per_minute(REVIEW_CREATE_RATE),
            global_rate_per_minute: GLOBAL_RATE,
            admin: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let defaults = Self::default();

        let jwt_secret = var("JWT_SECRET")
            .ok_or_else(|| AppError::EnvError("JWT_SECRET must be set".into()))?;

        let database_url = var("DATABASE_URL");
        if database_url.is_none() {
            warn!("DATABASE_URL not set, data will only live in memory");
        }

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        let admin = match (var("ADMIN_USERNAME"), var("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(AdminBootstrap {
                email: var("ADMIN_EMAIL").unwrap_or_default(),
                username,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            port: try_load("PORT", defaults.port)?,
            database_url,
            jwt_secret,
            token_ttl_hours: try_load("TOKEN_TTL_HOURS", defaults.token_ttl_hours)?,
            allowed_origins,
            search_page_size: try_load("SEARCH_PAGE_SIZE", defaults.search_page_size)?.max(1),
            review_list_window: load_window(
                "REVIEW_LIST_RATE",
                "REVIEW_LIST_PERIOD_SECS",
                defaults.review_list_window,
            )?,
            review_create_window: load_window(
                "REVIEW_CREATE_RATE",
                "REVIEW_CREATE_PERIOD_SECS",
                defaults.review_create_window,
            )?,
            global_rate_per_minute: try_load(
                "GLOBAL_RATE_PER_MINUTE",
                defaults.global_rate_per_minute,
            )?,
            admin,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::EnvError(format!("Invalid {key} value: {e}"))),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn load_window(
    rate_key: &str,
    period_key: &str,
    default: WindowConfig,
) -> Result<WindowConfig, AppError> {
    let requests = try_load(rate_key, default.requests)?;
    let period_secs = try_load(period_key, default.period.as_secs())?;
    if period_secs == 0 {
        return Err(AppError::EnvError(format!("{period_key} must be positive")));
    }

    Ok(WindowConfig {
        requests,
        period: Duration::from_secs(period_secs),
    })
}
