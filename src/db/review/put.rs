use sqlx::PgPool;

use super::REVIEW_COLUMNS;
use crate::{
    errors::AppError,
    models::{NewReview, Review},
};

/// Full replace of the review content. The title aggregate is not recomputed.
pub async fn update_review(
    review_id: i64,
    review: NewReview,
    postgres: &PgPool,
) -> Result<Option<Review>, AppError> {
    sqlx::query_as::<_, Review>(&format!(
        "WITH r AS (
            UPDATE reviews
            SET rating = $2, description = $3, active = $4, updated = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT {REVIEW_COLUMNS}
        FROM r JOIN users u ON u.id = r.author_id"
    ))
    .bind(review_id)
    .bind(review.rating)
    .bind(&review.description)
    .bind(review.active)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update review: {}", e)))
}
