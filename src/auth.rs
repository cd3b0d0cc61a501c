use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    errors::AppError,
    middleware::client_ip,
    models::{Claims, Identity, User},
    policy::{Operation, Policy},
    state::AppState,
};

/// The authenticated user, if any, plus the origin address of the request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub identity: Option<Identity>,
    pub origin: String,
    /// Claims of the presented token, kept for logout.
    pub claims: Option<Claims>,
}

impl Caller {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Throttle key: the user when known, the origin address otherwise.
    pub fn throttle_key(&self) -> String {
        match &self.identity {
            Some(identity) => format!("user:{}", identity.user_id),
            None => format!("ip:{}", self.origin),
        }
    }

    /// Fails with 401 for anonymous callers.
    pub fn require_identity(&self) -> Result<&Identity, AppError> {
        Policy::Authenticated.authorize(self.identity(), None, Operation::Unsafe)?;
        self.identity
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let origin = client_ip(&parts.extensions);

        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Caller {
                identity: None,
                origin,
                claims: None,
            });
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Unauthorized("Missing or invalid Authorization header".into())
                })?;

        let claims = decode_token(bearer.token(), &state.config.jwt_secret)?;

        if state.store.is_token_revoked(&claims.jti).await? {
            return Err(AppError::Unauthorized("Token has been revoked".into()));
        }

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".into()))?;

        let user = state
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

        Ok(Caller {
            identity: Some(user.identity()),
            origin,
            claims: Some(claims),
        })
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    Ok(token_data.claims)
}

pub fn generate_jwt(user: &User, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let expiration = (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        jti: Uuid::new_v4().to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(AppError::JwtError)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AppError::InternalError
        })
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
