//! Table bootstrap for the PostgreSQL store.

use sqlx::PgPool;

use crate::errors::AppError;

pub async fn run_migrations(postgres: &PgPool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to apply schema: {}", e)))?;

    tracing::info!("Database schema applied");
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(150) NOT NULL UNIQUE,
    email VARCHAR(254) NOT NULL,
    password_hash TEXT NOT NULL,
    is_staff BOOLEAN NOT NULL DEFAULT FALSE,
    date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS revoked_tokens (
    jti VARCHAR(64) PRIMARY KEY,
    expires_at TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS platforms (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(40) NOT NULL,
    description VARCHAR(150) NOT NULL,
    website VARCHAR(100) NOT NULL
);

-- avg_review and number_rating are only written by review creation
CREATE TABLE IF NOT EXISTS titles (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(250) NOT NULL,
    storyline TEXT NOT NULL,
    platform_id BIGINT NOT NULL REFERENCES platforms(id) ON DELETE CASCADE,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    avg_review DOUBLE PRECISION NOT NULL DEFAULT 0.0,
    number_rating INTEGER NOT NULL DEFAULT 0,
    created TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_titles_platform ON titles(platform_id);

-- one review per (author, title) is checked inside the creating transaction
CREATE TABLE IF NOT EXISTS reviews (
    id BIGSERIAL PRIMARY KEY,
    author_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
    description VARCHAR(200),
    active BOOLEAN NOT NULL DEFAULT TRUE,
    title_id BIGINT NOT NULL REFERENCES titles(id) ON DELETE CASCADE,
    created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_reviews_title ON reviews(title_id);
CREATE INDEX IF NOT EXISTS idx_reviews_author ON reviews(author_id);
"#;
