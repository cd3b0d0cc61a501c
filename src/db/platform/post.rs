use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{NewPlatform, Platform},
};

pub async fn create_platform(platform: NewPlatform, postgres: &PgPool) -> Result<Platform, AppError> {
    let platform = sqlx::query_as::<_, Platform>(
        "INSERT INTO platforms (name, description, website)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, website",
    )
    .bind(&platform.name)
    .bind(&platform.description)
    .bind(&platform.website)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create platform: {}", e)))?;

    tracing::info!("Created platform: {} (ID: {})", platform.name, platform.id);

    Ok(platform)
}
