pub mod platform;
pub mod review;
pub mod title;
pub mod user;

pub use platform::{NewPlatform, Platform, PlatformPayload};
pub use review::{AuthorQuery, NewReview, Review, ReviewFilter, ReviewPayload};
pub use title::{NewTitle, Page, RatingAggregate, SearchQuery, Title, TitlePayload};
pub use user::{Claims, Identity, NewUser, User};
