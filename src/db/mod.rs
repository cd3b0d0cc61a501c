//! Persistence behind a [`Store`] trait: PostgreSQL in production, [`MemoryStore`] otherwise.

pub mod memory;
pub mod platform;
pub mod postgres;
pub mod review;
pub mod schema;
pub mod title;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    errors::{AppError, FieldErrors},
    models::{
        NewPlatform, NewReview, NewTitle, NewUser, Platform, Review, ReviewFilter, Title, User,
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;
    async fn revoke_token(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), AppError>;
    async fn is_token_revoked(&self, jti: &str) -> Result<bool, AppError>;

    async fn list_platforms(&self) -> Result<Vec<Platform>, AppError>;
    async fn get_platform(&self, platform_id: i64) -> Result<Option<Platform>, AppError>;
    async fn create_platform(&self, platform: NewPlatform) -> Result<Platform, AppError>;
    async fn update_platform(
        &self,
        platform_id: i64,
        platform: NewPlatform,
    ) -> Result<Option<Platform>, AppError>;
    /// Removes the platform, its titles and their reviews. `false` when it did not exist.
    async fn delete_platform(&self, platform_id: i64) -> Result<bool, AppError>;

    async fn list_titles(&self) -> Result<Vec<Title>, AppError>;
    /// Returns the requested page (1-based) and the total number of matches.
    async fn search_titles(
        &self,
        terms: &[String],
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Title>, u64), AppError>;
    async fn get_title(&self, title_id: i64) -> Result<Option<Title>, AppError>;
    async fn create_title(&self, title: NewTitle) -> Result<Title, AppError>;
    async fn update_title(&self, title_id: i64, title: NewTitle) -> Result<Option<Title>, AppError>;
    /// Removes the title and its reviews. `false` when it did not exist.
    async fn delete_title(&self, title_id: i64) -> Result<bool, AppError>;

    /// Creates a review and updates the title aggregate as one atomic unit.
    ///
    /// Fails with `NotFound` for an unknown title and with a validation error when the author
    /// already reviewed it; nothing is written in either case.
    async fn create_review(
        &self,
        title_id: i64,
        author_id: i64,
        review: NewReview,
    ) -> Result<Review, AppError>;
    async fn list_reviews_for_title(
        &self,
        title_id: i64,
        filter: &ReviewFilter,
    ) -> Result<Vec<Review>, AppError>;
    async fn list_reviews_by_author(&self, username: &str) -> Result<Vec<Review>, AppError>;
    async fn get_review(&self, review_id: i64) -> Result<Option<Review>, AppError>;
    async fn update_review(&self, review_id: i64, review: NewReview)
    -> Result<Option<Review>, AppError>;
    async fn delete_review(&self, review_id: i64) -> Result<bool, AppError>;
}

pub fn duplicate_review() -> AppError {
    FieldErrors::single("non_field_errors", "You have already reviewed this title.").into()
}

pub fn title_not_found() -> AppError {
    AppError::NotFound("Title not found".into())
}
