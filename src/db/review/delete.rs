use sqlx::PgPool;

use crate::errors::AppError;

pub async fn delete_review(review_id: i64, postgres: &PgPool) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(review_id)
        .execute(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete review: {}", e)))?;

    Ok(result.rows_affected() > 0)
}
