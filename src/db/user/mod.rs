pub mod get;
pub mod post;

pub use get::{email_exists, get_user_by_id, get_user_by_username, is_token_revoked};
pub use post::{create_user, revoke_token};
