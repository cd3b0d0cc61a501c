use sqlx::PgPool;

use super::REVIEW_COLUMNS;
use crate::{
    aggregator::record_review,
    db::{duplicate_review, title_not_found},
    errors::AppError,
    models::{NewReview, RatingAggregate, Review},
};

/// Creates the review and folds its rating into the title, all in one transaction.
///
/// The title row is locked first, so concurrent reviews of the same title are applied one after
/// the other and the duplicate check cannot race.
pub async fn create_review(
    title_id: i64,
    author_id: i64,
    review: NewReview,
    postgres: &PgPool,
) -> Result<Review, AppError> {
    let mut tx = postgres.begin().await?;

    let (avg_review, number_rating) = sqlx::query_as::<_, (f64, i32)>(
        "SELECT avg_review, number_rating FROM titles WHERE id = $1 FOR UPDATE",
    )
    .bind(title_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to lock title: {}", e)))?
    .ok_or_else(title_not_found)?;

    let already_reviewed = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM reviews WHERE title_id = $1 AND author_id = $2)",
    )
    .bind(title_id)
    .bind(author_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to check existing review: {}", e)))?;

    if already_reviewed {
        return Err(duplicate_review());
    }

    let aggregate = record_review(
        RatingAggregate {
            avg_review,
            number_rating,
        },
        review.rating,
    );

    sqlx::query("UPDATE titles SET avg_review = $2, number_rating = $3 WHERE id = $1")
        .bind(title_id)
        .bind(aggregate.avg_review)
        .bind(aggregate.number_rating)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update title rating: {}", e)))?;

    let review = sqlx::query_as::<_, Review>(&format!(
        "WITH r AS (
            INSERT INTO reviews (author_id, rating, description, active, title_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        )
        SELECT {REVIEW_COLUMNS}
        FROM r JOIN users u ON u.id = r.author_id"
    ))
    .bind(author_id)
    .bind(review.rating)
    .bind(&review.description)
    .bind(review.active)
    .bind(title_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create review: {}", e)))?;

    tx.commit().await?;

    tracing::info!(
        "Created review {} for title {} (avg {:.2} over {})",
        review.id,
        title_id,
        aggregate.avg_review,
        aggregate.number_rating
    );

    Ok(review)
}
