use sqlx::PgPool;

use super::TITLE_COLUMNS;
use crate::{
    errors::AppError,
    models::{NewTitle, Title},
};

/// Aggregate fields start at their defaults; they are never taken from the payload.
pub async fn create_title(title: NewTitle, postgres: &PgPool) -> Result<Title, AppError> {
    let title = sqlx::query_as::<_, Title>(&format!(
        "WITH t AS (
            INSERT INTO titles (title, storyline, platform_id, active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        )
        SELECT {TITLE_COLUMNS}
        FROM t JOIN platforms p ON p.id = t.platform_id"
    ))
    .bind(&title.title)
    .bind(&title.storyline)
    .bind(title.platform_id)
    .bind(title.active)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create title: {}", e)))?;

    tracing::info!("Created title: {} (ID: {})", title.title, title.id);

    Ok(title)
}
