use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Title {
    pub id: i64,
    pub title: String,
    pub storyline: String,
    #[serde(rename = "platform")]
    pub platform_id: i64,
    pub platform_name: String,
    pub active: bool,
    pub avg_review: f64,
    pub number_rating: i32,
    pub created: DateTime<Utc>,
}

impl Title {
    pub fn aggregate(&self) -> RatingAggregate {
        RatingAggregate {
            avg_review: self.avg_review,
            number_rating: self.number_rating,
        }
    }
}

/// The derived rating pair stored on a title.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub avg_review: f64,
    pub number_rating: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TitlePayload {
    pub title: Option<String>,
    pub storyline: Option<String>,
    pub platform: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTitle {
    pub title: String,
    pub storyline: String,
    pub platform_id: i64,
    pub active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    #[serde(alias = "sheet")]
    pub page: Option<u32>,
}

/// One page of search results; `next`/`previous` are page numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, page: u32, page_size: u32) -> Self {
        let last_page = last_page(count, page_size);
        Self {
            count,
            next: (page < last_page).then_some(page + 1),
            previous: (page > 1).then(|| page - 1),
            results,
        }
    }
}

/// Highest valid page number; an empty result set still has page 1.
pub fn last_page(count: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    count.div_ceil(page_size).max(1) as u32
}

/// Splits search text on whitespace and commas.
pub fn search_terms(search: Option<&str>) -> Vec<String> {
    search
        .unwrap_or_default()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
