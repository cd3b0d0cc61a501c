use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        create_platform_handler, create_review_handler, create_title_handler,
        delete_platform_handler, delete_review_handler, delete_title_handler,
        get_platform_handler, get_review_handler, get_title_handler, list_author_reviews_handler,
        list_platforms_handler, list_title_reviews_handler, list_titles_handler, login_handler,
        logout_handler, register_handler, search_titles_handler, update_platform_handler,
        update_review_handler, update_title_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/account/register", post(register_handler))
        .route("/account/login", post(login_handler))
        .route("/account/logout", post(logout_handler))
        .route(
            "/platforms",
            get(list_platforms_handler).post(create_platform_handler),
        )
        .route(
            "/platforms/{id}",
            get(get_platform_handler)
                .put(update_platform_handler)
                .delete(delete_platform_handler),
        )
        .route("/titles", get(list_titles_handler).post(create_title_handler))
        .route("/titles/search", get(search_titles_handler))
        .route(
            "/titles/{id}",
            get(get_title_handler)
                .put(update_title_handler)
                .delete(delete_title_handler),
        )
        .route(
            "/titles/{id}/reviews",
            get(list_title_reviews_handler).post(create_review_handler),
        )
        .route("/reviews", get(list_author_reviews_handler))
        .route(
            "/reviews/{id}",
            get(get_review_handler)
                .put(update_review_handler)
                .delete(delete_review_handler),
        )
        .with_state(state)
}
