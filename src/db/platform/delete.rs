use sqlx::PgPool;

use crate::errors::AppError;

/// Deletes the platform with its titles and their reviews in one transaction.
pub async fn delete_platform(platform_id: i64, postgres: &PgPool) -> Result<bool, AppError> {
    let mut tx = postgres.begin().await?;

    let reviews = sqlx::query(
        "DELETE FROM reviews
        WHERE title_id IN (SELECT id FROM titles WHERE platform_id = $1)",
    )
    .bind(platform_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to delete platform reviews: {}", e)))?;

    let titles = sqlx::query("DELETE FROM titles WHERE platform_id = $1")
        .bind(platform_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete platform titles: {}", e)))?;

    let deleted = sqlx::query("DELETE FROM platforms WHERE id = $1")
        .bind(platform_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete platform: {}", e)))?
        .rows_affected();

    if deleted == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;

    tracing::info!(
        "Deleted platform {} with {} titles and {} reviews",
        platform_id,
        titles.rows_affected(),
        reviews.rows_affected()
    );

    Ok(true)
}
