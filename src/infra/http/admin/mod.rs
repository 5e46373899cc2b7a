mod dashboard;
mod forms;
mod posts;
mod state;

pub use state::AdminState;

use axum::{
    Router,
    extract::State,
    middleware,
    response::Response,
    routing::{get, post},
};

use crate::infra::assets;

use super::db_health_response;
use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(dashboard::admin_dashboard))
        .route("/posts/new", get(posts::admin_post_new))
        .route("/posts/create", post(posts::admin_post_create))
        .route("/posts/generate", post(posts::admin_post_generate))
        .route(
            "/posts/{id}/edit",
            get(posts::admin_post_edit).post(posts::admin_post_update),
        )
        .route(
            "/posts/{id}/delete",
            get(posts::admin_post_delete_confirm).post(posts::admin_post_delete),
        )
        .route("/_health/db", get(admin_health))
        .route("/static/{*path}", get(assets::serve_static_asset))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn admin_health(State(state): State<AdminState>) -> Response {
    db_health_response(state.posts.repo().health_check().await)
}
