use sqlx::PgPool;

use super::TITLE_COLUMNS;
use crate::{errors::AppError, models::Title};

pub async fn get_all_titles(postgres: &PgPool) -> Result<Vec<Title>, AppError> {
    sqlx::query_as::<_, Title>(&format!(
        "SELECT {TITLE_COLUMNS}
        FROM titles t JOIN platforms p ON p.id = t.platform_id
        ORDER BY t.id"
    ))
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch titles: {}", e)))
}

pub async fn get_title(title_id: i64, postgres: &PgPool) -> Result<Option<Title>, AppError> {
    sqlx::query_as::<_, Title>(&format!(
        "SELECT {TITLE_COLUMNS}
        FROM titles t JOIN platforms p ON p.id = t.platform_id
        WHERE t.id = $1"
    ))
    .bind(title_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch title: {}", e)))
}

// Every term has to hit title, storyline or platform name.
const SEARCH_FILTER: &str = "NOT EXISTS (
    SELECT 1 FROM unnest($1::text[]) AS term
    WHERE NOT (
        t.title ILIKE '%' || term || '%'
        OR t.storyline ILIKE '%' || term || '%'
        OR p.name ILIKE '%' || term || '%'
    )
)";

/// One page of matches plus the total match count.
pub async fn search_titles(
    terms: &[String],
    page: u32,
    page_size: u32,
    postgres: &PgPool,
) -> Result<(Vec<Title>, u64), AppError> {
    let patterns: Vec<String> = terms.iter().map(|term| escape_like(term)).collect();

    let count = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*)
        FROM titles t JOIN platforms p ON p.id = t.platform_id
        WHERE {SEARCH_FILTER}"
    ))
    .bind(&patterns)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to count search results: {}", e)))?;

    let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);

    let titles = sqlx::query_as::<_, Title>(&format!(
        "SELECT {TITLE_COLUMNS}
        FROM titles t JOIN platforms p ON p.id = t.platform_id
        WHERE {SEARCH_FILTER}
        ORDER BY t.id
        LIMIT $2 OFFSET $3"
    ))
    .bind(&patterns)
    .bind(i64::from(page_size))
    .bind(offset)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to search titles: {}", e)))?;

    Ok((titles, count.max(0) as u64))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
