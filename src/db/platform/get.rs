use sqlx::PgPool;

use crate::{errors::AppError, models::Platform};

pub async fn get_all_platforms(postgres: &PgPool) -> Result<Vec<Platform>, AppError> {
    sqlx::query_as::<_, Platform>(
        "SELECT id, name, description, website FROM platforms ORDER BY id",
    )
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch platforms: {}", e)))
}

pub async fn get_platform(platform_id: i64, postgres: &PgPool) -> Result<Option<Platform>, AppError> {
    sqlx::query_as::<_, Platform>(
        "SELECT id, name, description, website FROM platforms WHERE id = $1",
    )
    .bind(platform_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch platform: {}", e)))
}
