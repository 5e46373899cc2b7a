pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{Router, routing::get, routing::post};

use crate::infra::http::RouterState;

/// JSON routes; mounted on the public listener by [`super::build_router`].
pub fn routes() -> Router<RouterState> {
    Router::new()
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/api/posts/slug/{slug}", get(handlers::get_post_by_slug))
        .route("/api/stats", get(handlers::stats))
        .route("/api/generate", post(handlers::generate))
}
