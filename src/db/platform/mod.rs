pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub use delete::delete_platform;
pub use get::{get_all_platforms, get_platform};
pub use post::create_platform;
pub use put::update_platform;
