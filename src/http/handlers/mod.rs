pub mod account;
pub mod platform;
pub mod review;
pub mod title;

pub use account::{login_handler, logout_handler, register_handler};
pub use platform::{
    create_platform_handler, delete_platform_handler, get_platform_handler,
    list_platforms_handler, update_platform_handler,
};
pub use review::{
    create_review_handler, delete_review_handler, get_review_handler,
    list_author_reviews_handler, list_title_reviews_handler, update_review_handler,
};
pub use title::{
    create_title_handler, delete_title_handler, get_title_handler, list_titles_handler,
    search_titles_handler, update_title_handler,
};
