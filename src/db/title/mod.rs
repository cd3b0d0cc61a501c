pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use delete::delete_title;
pub use get::{get_all_titles, get_title, search_titles};
pub use post::create_title;
pub use put::update_title;

/// Columns of `models::Title`, over `titles t JOIN platforms p`.
pub(crate) const TITLE_COLUMNS: &str = "t.id, t.title, t.storyline, t.platform_id, \
    p.name AS platform_name, t.active, t.avg_review, t.number_rating, t.created";
