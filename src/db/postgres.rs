use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions};

use super::{Store, platform, review, schema, title, user};
use crate::{
    errors::AppError,
    models::{
        NewPlatform, NewReview, NewTitle, NewUser, Platform, Review, ReviewFilter, Title, User,
    },
};

#[derive(Clone)]
pub struct PgStore {
    postgres: PgPool,
}

impl PgStore {
    /// Connects and makes sure the tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let postgres = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

        schema::run_migrations(&postgres).await?;

        Ok(Self { postgres })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        user::create_user(new_user, &self.postgres).await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        user::get_user_by_id(user_id, &self.postgres).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        user::get_user_by_username(username, &self.postgres).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        user::email_exists(email, &self.postgres).await
    }

    async fn revoke_token(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        user::revoke_token(jti, expires_at, &self.postgres).await
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool, AppError> {
        user::is_token_revoked(jti, &self.postgres).await
    }

    async fn list_platforms(&self) -> Result<Vec<Platform>, AppError> {
        platform::get_all_platforms(&self.postgres).await
    }

    async fn get_platform(&self, platform_id: i64) -> Result<Option<Platform>, AppError> {
        platform::get_platform(platform_id, &self.postgres).await
    }

    async fn create_platform(&self, new_platform: NewPlatform) -> Result<Platform, AppError> {
        platform::create_platform(new_platform, &self.postgres).await
    }

    async fn update_platform(
        &self,
        platform_id: i64,
        new_platform: NewPlatform,
    ) -> Result<Option<Platform>, AppError> {
        platform::update_platform(platform_id, new_platform, &self.postgres).await
    }

    async fn delete_platform(&self, platform_id: i64) -> Result<bool, AppError> {
        platform::delete_platform(platform_id, &self.postgres).await
    }

    async fn list_titles(&self) -> Result<Vec<Title>, AppError> {
        title::get_all_titles(&self.postgres).await
    }

    async fn search_titles(
        &self,
        terms: &[String],
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Title>, u64), AppError> {
        title::search_titles(terms, page, page_size, &self.postgres).await
    }

    async fn get_title(&self, title_id: i64) -> Result<Option<Title>, AppError> {
        title::get_title(title_id, &self.postgres).await
    }

    async fn create_title(&self, new_title: NewTitle) -> Result<Title, AppError> {
        title::create_title(new_title, &self.postgres).await
    }

    async fn update_title(
        &self,
        title_id: i64,
        new_title: NewTitle,
    ) -> Result<Option<Title>, AppError> {
        title::update_title(title_id, new_title, &self.postgres).await
    }

    async fn delete_title(&self, title_id: i64) -> Result<bool, AppError> {
        title::delete_title(title_id, &self.postgres).await
    }

    async fn create_review(
        &self,
        title_id: i64,
        author_id: i64,
        new_review: NewReview,
    ) -> Result<Review, AppError> {
        review::create_review(title_id, author_id, new_review, &self.postgres).await
    }

    async fn list_reviews_for_title(
        &self,
        title_id: i64,
        filter: &ReviewFilter,
    ) -> Result<Vec<Review>, AppError> {
        review::get_reviews_for_title(title_id, filter, &self.postgres).await
    }

    async fn list_reviews_by_author(&self, username: &str) -> Result<Vec<Review>, AppError> {
        review::get_reviews_by_author(username, &self.postgres).await
    }

    async fn get_review(&self, review_id: i64) -> Result<Option<Review>, AppError> {
        review::get_review(review_id, &self.postgres).await
    }

    async fn update_review(
        &self,
        review_id: i64,
        new_review: NewReview,
    ) -> Result<Option<Review>, AppError> {
        review::update_review(review_id, new_review, &self.postgres).await
    }

    async fn delete_review(&self, review_id: i64) -> Result<bool, AppError> {
        review::delete_review(review_id, &self.postgres).await
    }
}
