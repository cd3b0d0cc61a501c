use sqlx::PgPool;

use crate::errors::AppError;

/// Deletes the title and its reviews in one transaction.
pub async fn delete_title(title_id: i64, postgres: &PgPool) -> Result<bool, AppError> {
    let mut tx = postgres.begin().await?;

    let reviews = sqlx::query("DELETE FROM reviews WHERE title_id = $1")
        .bind(title_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete title reviews: {}", e)))?;

    let deleted = sqlx::query("DELETE FROM titles WHERE id = $1")
        .bind(title_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete title: {}", e)))?
        .rows_affected();

    if deleted == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;

    tracing::info!(
        "Deleted title {} with {} reviews",
        title_id,
        reviews.rows_affected()
    );

    Ok(true)
}
