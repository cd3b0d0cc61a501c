use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    errors::{AppError, FieldErrors},
    models::{NewUser, User},
};

pub async fn create_user(user: NewUser, postgres: &PgPool) -> Result<User, AppError> {
    let created = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, is_staff)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username) DO NOTHING
        RETURNING id, username, email, password_hash, is_staff, date_joined",
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.is_staff)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {}", e)))?;

    let Some(created) = created else {
        return Err(FieldErrors::single(
            "username",
            "A user with that username already exists.",
        )
        .into());
    };

    tracing::info!("Created user: {} (ID: {})", created.username, created.id);

    Ok(created)
}

/// Stores the token id until its expiry; expired entries are pruned on the way.
pub async fn revoke_token(
    jti: &str,
    expires_at: DateTime<Utc>,
    postgres: &PgPool,
) -> Result<(), AppError> {
    let mut tx = postgres.begin().await?;

    sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to prune tokens: {}", e)))?;

    sqlx::query(
        "INSERT INTO revoked_tokens (jti, expires_at) VALUES ($1, $2)
        ON CONFLICT (jti) DO NOTHING",
    )
    .bind(jti)
    .bind(expires_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to revoke token: {}", e)))?;

    tx.commit().await?;
    Ok(())
}
