use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    auth::Caller,
    errors::AppError,
    http::extract::AppJson,
    models::{Platform, PlatformPayload},
    policy::{Operation, Policy},
    state::AppState,
    validation::validate_platform,
};

fn platform_not_found() -> AppError {
    AppError::NotFound("Platform not found".into())
}

pub async fn list_platforms_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Platform>>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;

    let platforms = state.store.list_platforms().await.map_err(|e| {
        tracing::error!("Error retrieving platforms: {}", e);
        e
    })?;

    tracing::info!("Retrieved {} platforms", platforms.len());
    Ok(Json(platforms))
}

pub async fn create_platform_handler(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<AppJson<PlatformPayload>, AppError>,
) -> Result<(StatusCode, Json<Platform>), AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Unsafe)?;
    let AppJson(payload) = payload?;
    let new_platform = validate_platform(payload)?;

    let platform = state
        .store
        .create_platform(new_platform)
        .await
        .map_err(|e| {
            tracing::error!("Error creating platform: {}", e);
            e
        })?;

    tracing::info!("Platform created with ID: {}", platform.id);
    Ok((StatusCode::CREATED, Json(platform)))
}

pub async fn get_platform_handler(
    Path(platform_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Platform>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;

    let platform = state
        .store
        .get_platform(platform_id)
        .await?
        .ok_or_else(platform_not_found)?;

    Ok(Json(platform))
}

pub async fn update_platform_handler(
    Path(platform_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<AppJson<PlatformPayload>, AppError>,
) -> Result<Json<Platform>, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Unsafe)?;
    let AppJson(payload) = payload?;

    if state.store.get_platform(platform_id).await?.is_none() {
        return Err(platform_not_found());
    }
    let new_platform = validate_platform(payload)?;

    let platform = state
        .store
        .update_platform(platform_id, new_platform)
        .await
        .map_err(|e| {
            tracing::error!("Error updating platform {}: {}", platform_id, e);
            e
        })?
        .ok_or_else(platform_not_found)?;

    tracing::info!("Platform {} updated", platform_id);
    Ok(Json(platform))
}

pub async fn delete_platform_handler(
    Path(platform_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<StatusCode, AppError> {
    Policy::AdminOrReadOnly.authorize(caller.identity(), None, Operation::Unsafe)?;

    let deleted = state
        .store
        .delete_platform(platform_id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting platform {}: {}", platform_id, e);
            e
        })?;

    if !deleted {
        return Err(platform_not_found());
    }

    tracing::info!("Platform {} deleted", platform_id);
    Ok(StatusCode::NO_CONTENT)
}
