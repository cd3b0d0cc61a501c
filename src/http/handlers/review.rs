use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    auth::Caller,
    errors::AppError,
    http::extract::{AppJson, AppQuery},
    models::{AuthorQuery, Review, ReviewFilter, ReviewPayload},
    policy::{Operation, Policy},
    state::AppState,
    throttle::Scope,
    validation::validate_review,
};

fn review_not_found() -> AppError {
    AppError::NotFound("Review not found".into())
}

pub async fn create_review_handler(
    Path(title_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<AppJson<ReviewPayload>, AppError>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let author = caller.require_identity()?;
    state
        .throttles
        .check(Scope::ReviewCreate, &caller.throttle_key())?;

    let AppJson(payload) = payload?;
    let new_review = validate_review(payload)?;

    let review = state
        .store
        .create_review(title_id, author.user_id, new_review)
        .await
        .map_err(|e| {
            tracing::warn!(
                "Review by {} for title {} rejected: {}",
                author.username,
                title_id,
                e
            );
            e
        })?;

    tracing::info!(
        "Review {} created by {} for title {}",
        review.id,
        author.username,
        title_id
    );
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn list_title_reviews_handler(
    Path(title_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
    AppQuery(filter): AppQuery<ReviewFilter>,
) -> Result<Json<Vec<Review>>, AppError> {
    Policy::OwnerOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;
    state
        .throttles
        .check(Scope::ReviewList, &caller.throttle_key())?;

    let reviews = state
        .store
        .list_reviews_for_title(title_id, &filter)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving reviews for title {}: {}", title_id, e);
            e
        })?;

    tracing::info!("Retrieved {} reviews for title {}", reviews.len(), title_id);
    Ok(Json(reviews))
}

/// Reviews written by `?username=`; an absent or unknown username yields an empty list.
pub async fn list_author_reviews_handler(
    State(state): State<AppState>,
    caller: Caller,
    AppQuery(query): AppQuery<AuthorQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    Policy::OwnerOrReadOnly.authorize(caller.identity(), None, Operation::Safe)?;

    let Some(username) = query.username.filter(|u| !u.is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let reviews = state
        .store
        .list_reviews_by_author(&username)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving reviews by {}: {}", username, e);
            e
        })?;

    Ok(Json(reviews))
}

pub async fn get_review_handler(
    Path(review_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Review>, AppError> {
    let review = state
        .store
        .get_review(review_id)
        .await?
        .ok_or_else(review_not_found)?;

    Policy::OwnerOrReadOnly.authorize(caller.identity(), Some(review.author_id), Operation::Safe)?;
    Ok(Json(review))
}

pub async fn update_review_handler(
    Path(review_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<AppJson<ReviewPayload>, AppError>,
) -> Result<Json<Review>, AppError> {
    let existing = state
        .store
        .get_review(review_id)
        .await?
        .ok_or_else(review_not_found)?;

    Policy::OwnerOrReadOnly.authorize(
        caller.identity(),
        Some(existing.author_id),
        Operation::Unsafe,
    )?;

    let AppJson(payload) = payload?;
    let new_review = validate_review(payload)?;

    let review = state
        .store
        .update_review(review_id, new_review)
        .await
        .map_err(|e| {
            tracing::error!("Error updating review {}: {}", review_id, e);
            e
        })?
        .ok_or_else(review_not_found)?;

    tracing::info!("Review {} updated", review_id);
    Ok(Json(review))
}

pub async fn delete_review_handler(
    Path(review_id): Path<i64>,
    State(state): State<AppState>,
    caller: Caller,
) -> Result<StatusCode, AppError> {
    let existing = state
        .store
        .get_review(review_id)
        .await?
        .ok_or_else(review_not_found)?;

    Policy::OwnerOrReadOnly.authorize(
        caller.identity(),
        Some(existing.author_id),
        Operation::Unsafe,
    )?;

    if !state.store.delete_review(review_id).await? {
        return Err(review_not_found());
    }

    tracing::info!("Review {} deleted", review_id);
    Ok(StatusCode::NO_CONTENT)
}
