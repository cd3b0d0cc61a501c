use sqlx::PgPool;

use crate::{errors::AppError, models::User};

const USER_COLUMNS: &str = "id, username, email, password_hash, is_staff, date_joined";

pub async fn get_user_by_id(user_id: i64, postgres: &PgPool) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user: {}", e)))
}

pub async fn get_user_by_username(username: &str, postgres: &PgPool) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user: {}", e)))
}

pub async fn email_exists(email: &str, postgres: &PgPool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
        .bind(email)
        .fetch_one(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to check email: {}", e)))
}

pub async fn is_token_revoked(jti: &str, postgres: &PgPool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
        .bind(jti)
        .fetch_one(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to check token: {}", e)))
}
