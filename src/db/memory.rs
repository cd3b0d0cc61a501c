use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{Store, duplicate_review, title_not_found};
use crate::{
    aggregator::record_review,
    errors::{AppError, FieldErrors},
    models::{
        NewPlatform, NewReview, NewTitle, NewUser, Platform, Review, ReviewFilter, Title, User,
    },
};

/// In-process store. A single lock over all tables makes every operation atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    revoked_tokens: HashMap<String, DateTime<Utc>>,
    platforms: BTreeMap<i64, Platform>,
    titles: BTreeMap<i64, Title>,
    reviews: BTreeMap<i64, Review>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove_title(&mut self, title_id: i64) -> Option<Title> {
        let title = self.titles.remove(&title_id)?;
        self.reviews.retain(|_, review| review.title_id != title_id);
        Some(title)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_terms(title: &Title, terms: &[String]) -> bool {
    let fields = [
        title.title.to_lowercase(),
        title.storyline.to_lowercase(),
        title.platform_name.to_lowercase(),
    ];
    terms.iter().all(|term| {
        let term = term.to_lowercase();
        fields.iter().any(|field| field.contains(&term))
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.inner.lock().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(FieldErrors::single(
                "username",
                "A user with that username already exists.",
            )
            .into());
        }

        let id = tables.next_id();
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_staff: user.is_staff,
            date_joined: Utc::now(),
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(self.inner.lock().await.users.get(&user_id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .users
            .values()
            .any(|user| user.email.eq_ignore_ascii_case(email)))
    }

    async fn revoke_token(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), AppError> {
        let mut tables = self.inner.lock().await;
        let now = Utc::now();
        tables.revoked_tokens.retain(|_, expiry| *expiry >= now);
        tables.revoked_tokens.insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool, AppError> {
        Ok(self.inner.lock().await.revoked_tokens.contains_key(jti))
    }

    async fn list_platforms(&self) -> Result<Vec<Platform>, AppError> {
        Ok(self.inner.lock().await.platforms.values().cloned().collect())
    }

    async fn get_platform(&self, platform_id: i64) -> Result<Option<Platform>, AppError> {
        Ok(self.inner.lock().await.platforms.get(&platform_id).cloned())
    }

    async fn create_platform(&self, platform: NewPlatform) -> Result<Platform, AppError> {
        let mut tables = self.inner.lock().await;
        let id = tables.next_id();
        let created = Platform {
            id,
            name: platform.name,
            description: platform.description,
            website: platform.website,
        };
        tables.platforms.insert(id, created.clone());
        Ok(created)
    }

    async fn update_platform(
        &self,
        platform_id: i64,
        platform: NewPlatform,
    ) -> Result<Option<Platform>, AppError> {
        let mut tables = self.inner.lock().await;
        let Some(existing) = tables.platforms.get_mut(&platform_id) else {
            return Ok(None);
        };

        existing.name = platform.name;
        existing.description = platform.description;
        existing.website = platform.website;
        let updated = existing.clone();

        for title in tables.titles.values_mut() {
            if title.platform_id == platform_id {
                title.platform_name = updated.name.clone();
            }
        }
        Ok(Some(updated))
    }

    async fn delete_platform(&self, platform_id: i64) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().await;
        if tables.platforms.remove(&platform_id).is_none() {
            return Ok(false);
        }

        let title_ids: Vec<i64> = tables
            .titles
            .values()
            .filter(|title| title.platform_id == platform_id)
            .map(|title| title.id)
            .collect();
        for title_id in title_ids {
            tables.remove_title(title_id);
        }
        Ok(true)
    }

    async fn list_titles(&self) -> Result<Vec<Title>, AppError> {
        Ok(self.inner.lock().await.titles.values().cloned().collect())
    }

    async fn search_titles(
        &self,
        terms: &[String],
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Title>, u64), AppError> {
        let tables = self.inner.lock().await;
        let matches: Vec<&Title> = tables
            .titles
            .values()
            .filter(|title| matches_terms(title, terms))
            .collect();

        let offset = page.saturating_sub(1) as usize * page_size as usize;
        let results = matches
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|title| (*title).clone())
            .collect();
        Ok((results, matches.len() as u64))
    }

    async fn get_title(&self, title_id: i64) -> Result<Option<Title>, AppError> {
        Ok(self.inner.lock().await.titles.get(&title_id).cloned())
    }

    async fn create_title(&self, title: NewTitle) -> Result<Title, AppError> {
        let mut tables = self.inner.lock().await;
        let platform_name = tables
            .platforms
            .get(&title.platform_id)
            .map(|platform| platform.name.clone())
            .ok_or_else(|| AppError::NotFound("Platform not found".into()))?;

        let id = tables.next_id();
        let created = Title {
            id,
            title: title.title,
            storyline: title.storyline,
            platform_id: title.platform_id,
            platform_name,
            active: title.active,
            avg_review: 0.0,
            number_rating: 0,
            created: Utc::now(),
        };
        tables.titles.insert(id, created.clone());
        Ok(created)
    }

    async fn update_title(&self, title_id: i64, title: NewTitle) -> Result<Option<Title>, AppError> {
        let mut tables = self.inner.lock().await;
        let platform_name = tables
            .platforms
            .get(&title.platform_id)
            .map(|platform| platform.name.clone())
            .ok_or_else(|| AppError::NotFound("Platform not found".into()))?;

        let Some(existing) = tables.titles.get_mut(&title_id) else {
            return Ok(None);
        };
        existing.title = title.title;
        existing.storyline = title.storyline;
        existing.platform_id = title.platform_id;
        existing.platform_name = platform_name;
        existing.active = title.active;
        Ok(Some(existing.clone()))
    }

    async fn delete_title(&self, title_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().await.remove_title(title_id).is_some())
    }

    async fn create_review(
        &self,
        title_id: i64,
        author_id: i64,
        review: NewReview,
    ) -> Result<Review, AppError> {
        let mut tables = self.inner.lock().await;

        let current = tables
            .titles
            .get(&title_id)
            .map(Title::aggregate)
            .ok_or_else(title_not_found)?;

        if tables
            .reviews
            .values()
            .any(|r| r.title_id == title_id && r.author_id == author_id)
        {
            return Err(duplicate_review());
        }

        let author = tables
            .users
            .get(&author_id)
            .map(|user| user.username.clone())
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let aggregate = record_review(current, review.rating);
        if let Some(title) = tables.titles.get_mut(&title_id) {
            title.avg_review = aggregate.avg_review;
            title.number_rating = aggregate.number_rating;
        }

        let id = tables.next_id();
        let now = Utc::now();
        let created = Review {
            id,
            author_id,
            author,
            rating: review.rating,
            description: review.description,
            active: review.active,
            title_id,
            created: now,
            updated: now,
        };
        tables.reviews.insert(id, created.clone());
        Ok(created)
    }

    async fn list_reviews_for_title(
        &self,
        title_id: i64,
        filter: &ReviewFilter,
    ) -> Result<Vec<Review>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .reviews
            .values()
            .filter(|review| review.title_id == title_id && filter.matches(review))
            .cloned()
            .collect())
    }

    async fn list_reviews_by_author(&self, username: &str) -> Result<Vec<Review>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .reviews
            .values()
            .filter(|review| review.author == username)
            .cloned()
            .collect())
    }

    async fn get_review(&self, review_id: i64) -> Result<Option<Review>, AppError> {
        Ok(self.inner.lock().await.reviews.get(&review_id).cloned())
    }

    async fn update_review(
        &self,
        review_id: i64,
        review: NewReview,
    ) -> Result<Option<Review>, AppError> {
        let mut tables = self.inner.lock().await;
        let Some(existing) = tables.reviews.get_mut(&review_id) else {
            return Ok(None);
        };
        existing.rating = review.rating;
        existing.description = review.description;
        existing.active = review.active;
        existing.updated = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_review(&self, review_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().await.reviews.remove(&review_id).is_some())
    }
}
