use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};

use crate::{
    auth::{Caller, generate_jwt, hash_password, verify_password},
    errors::{AppError, FieldErrors},
    http::extract::AppJson,
    models::{
        NewUser,
        user::{LoginPayload, RegisterPayload, RegisterResponse, TokenResponse},
    },
    state::AppState,
    validation::{validate_login, validate_registration},
};

pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let registration = validate_registration(payload)?;

    let mut errors = FieldErrors::new();
    if state
        .store
        .get_user_by_username(&registration.username)
        .await?
        .is_some()
    {
        errors.add("username", "A user with that username already exists.");
    }
    if state.store.email_exists(&registration.email).await? {
        errors.add("email", "Email already exists!");
    }
    errors.finish(())?;

    let user = state
        .store
        .create_user(NewUser {
            username: registration.username,
            email: registration.email,
            password_hash: hash_password(&registration.password)?,
            is_staff: false,
        })
        .await
        .map_err(|e| {
            tracing::error!("Error creating user: {}", e);
            e
        })?;

    let token = generate_jwt(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;

    tracing::info!("User registered: {} (ID: {})", user.username, user.id);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.username,
            email: user.email,
            token,
        }),
    ))
}

pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    let (username, password) = validate_login(payload)?;

    let user = state
        .store
        .get_user_by_username(&username)
        .await?
        .filter(|user| verify_password(&password, &user.password_hash))
        .ok_or_else(|| {
            tracing::warn!("Failed login attempt for {}", username);
            AppError::from(FieldErrors::single(
                "non_field_errors",
                "Unable to log in with provided credentials.",
            ))
        })?;

    let token = generate_jwt(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;

    tracing::info!("User logged in: {}", user.username);
    Ok(Json(TokenResponse { token }))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<&'static str>, AppError> {
    let identity = caller.require_identity()?;
    let claims = caller
        .claims
        .as_ref()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0).unwrap_or_else(Utc::now);
    state.store.revoke_token(&claims.jti, expires_at).await?;

    tracing::info!("User logged out: {}", identity.username);
    Ok(Json("success"))
}
