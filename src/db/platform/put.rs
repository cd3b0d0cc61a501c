use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{NewPlatform, Platform},
};

/// Full replace; `None` when the platform does not exist.
pub async fn update_platform(
    platform_id: i64,
    platform: NewPlatform,
    postgres: &PgPool,
) -> Result<Option<Platform>, AppError> {
    sqlx::query_as::<_, Platform>(
        "UPDATE platforms
        SET name = $2, description = $3, website = $4
        WHERE id = $1
        RETURNING id, name, description, website",
    )
    .bind(platform_id)
    .bind(&platform.name)
    .bind(&platform.description)
    .bind(&platform.website)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to update platform: {}", e)))
}
