pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use delete::delete_review;
pub use get::{get_review, get_reviews_by_author, get_reviews_for_title};
pub use post::create_review;
pub use put::update_review;

/// Columns of `models::Review`, over `reviews r JOIN users u`.
pub(crate) const REVIEW_COLUMNS: &str = "r.id, r.author_id, u.username AS author, r.rating, \
    r.description, r.active, r.title_id, r.created, r.updated";
