use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    #[serde(skip)]
    pub author_id: i64,
    /// Username of the author.
    pub author: String,
    pub rating: i16,
    pub description: Option<String>,
    pub active: bool,
    #[serde(rename = "title")]
    pub title_id: i64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    pub rating: Option<i64>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// Validated review content; author and title always come from the request context.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub rating: i16,
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewFilter {
    pub active: Option<bool>,
    #[serde(alias = "review_user__username")]
    pub username: Option<String>,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        self.active.is_none_or(|active| review.active == active)
            && self
                .username
                .as_deref()
                .is_none_or(|username| review.author == username)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorQuery {
    pub username: Option<String>,
}
