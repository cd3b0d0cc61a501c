use sqlx::PgPool;

use super::TITLE_COLUMNS;
use crate::{
    errors::AppError,
    models::{NewTitle, Title},
};

/// Replaces the client-owned fields; the rating aggregate is left as is.
pub async fn update_title(
    title_id: i64,
    title: NewTitle,
    postgres: &PgPool,
) -> Result<Option<Title>, AppError> {
    sqlx::query_as::<_, Title>(&format!(
        "WITH t AS (
            UPDATE titles
            SET title = $2, storyline = $3, platform_id = $4, active = $5
            WHERE id = $1
            RETURNING *
        )
        SELECT {TITLE_COLUMNS}
        FROM t JOIN platforms p ON p.id = t.platform_id"
    ))
    .bind(title_id)
    .bind(&title.title)
    .bind(&title.storyline)
    .bind(title.platform_id)
    .bind(title.active)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update title: {}", e)))
}
