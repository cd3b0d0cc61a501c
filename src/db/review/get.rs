use sqlx::PgPool;

use super::REVIEW_COLUMNS;
use crate::{
    errors::AppError,
    models::{Review, ReviewFilter},
};

pub async fn get_review(review_id: i64, postgres: &PgPool) -> Result<Option<Review>, AppError> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS}
        FROM reviews r JOIN users u ON u.id = r.author_id
        WHERE r.id = $1"
    ))
    .bind(review_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch review: {}", e)))
}

pub async fn get_reviews_for_title(
    title_id: i64,
    filter: &ReviewFilter,
    postgres: &PgPool,
) -> Result<Vec<Review>, AppError> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS}
        FROM reviews r JOIN users u ON u.id = r.author_id
        WHERE r.title_id = $1
            AND ($2::BOOLEAN IS NULL OR r.active = $2)
            AND ($3::TEXT IS NULL OR u.username = $3)
        ORDER BY r.id"
    ))
    .bind(title_id)
    .bind(filter.active)
    .bind(filter.username.as_deref())
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch reviews: {}", e)))
}

pub async fn get_reviews_by_author(username: &str, postgres: &PgPool) -> Result<Vec<Review>, AppError> {
    sqlx::query_as::<_, Review>(&format!(
        "SELECT {REVIEW_COLUMNS}
        FROM reviews r JOIN users u ON u.id = r.author_id
        WHERE u.username = $1
        ORDER BY r.id"
    ))
    .bind(username)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch reviews by author: {}", e)))
}
