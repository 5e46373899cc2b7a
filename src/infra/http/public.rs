use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::{chrome::ChromeService, posts::PostService},
    infra::assets,
    presentation::views::{
        AboutTemplate, AboutView, HomeView, IndexTemplate, LayoutContext, PostDetailContext,
        PostTemplate, PostsIndexView, PostsTemplate, SearchTemplate, SearchView, post_cards,
        render_not_found_response, render_template_response,
    },
};

use super::{
    RouterState, api, db_health_response,
    middleware::{log_responses, set_request_context},
    repo_error_to_http,
};

#[derive(Clone)]
pub struct HttpState {
    pub posts: PostService,
    pub chrome: Arc<ChromeService>,
}

/// Public pages, the JSON API and health checks on one listener.
pub fn build_router(state: RouterState) -> Router {
    let pages = Router::new()
        .route("/", get(index))
        .route("/posts", get(posts_index))
        .route("/posts/{slug}", get(post_detail))
        .route("/search", get(search))
        .route("/about", get(about))
        .route("/_health/db", get(public_health))
        .route("/static/{*path}", get(assets::serve_static_asset))
        .fallback(fallback);

    pages
        .merge(api::routes())
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchQuery {
    q: Option<String>,
}

async fn index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load();
    let posts = state.posts.list().await;

    let canonical = state.chrome.canonical_url("/");
    let content = HomeView {
        posts: post_cards(&posts),
    };
    let view = LayoutContext::new(chrome.with_canonical(canonical), content);
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn posts_index(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load();
    let posts = state.posts.list().await;

    let canonical = state.chrome.canonical_url("/posts");
    let content = PostsIndexView {
        count: posts.len(),
        posts: post_cards(&posts),
    };
    let view = LayoutContext::new(
        chrome.with_canonical(canonical).with_page_title("All posts"),
        content,
    );
    render_template_response(PostsTemplate { view }, StatusCode::OK)
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let chrome = state.chrome.load();

    match state.posts.find_by_slug(&slug).await {
        Ok(Some(post)) => {
            let related = state.posts.related(&post).await;
            let canonical = state.chrome.canonical_url(&format!("/posts/{}", post.slug));
            let content = PostDetailContext::build(&post, &related, &canonical);
            let view = LayoutContext::new(
                chrome.with_canonical(canonical).with_page_title(&post.title),
                content,
            );
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => repo_error_to_http("infra::http::public::post_detail", err).into_response(),
    }
}

async fn search(State(state): State<HttpState>, Query(query): Query<SearchQuery>) -> Response {
    let chrome = state.chrome.load();
    let term = query.q.unwrap_or_default();
    let posts = state.posts.search(&term).await;

    let canonical = state.chrome.canonical_url("/search");
    let content = SearchView {
        query: term.trim().to_string(),
        posts: post_cards(&posts),
    };
    let view = LayoutContext::new(
        chrome.with_canonical(canonical).with_page_title("Search"),
        content,
    );
    render_template_response(SearchTemplate { view }, StatusCode::OK)
}

async fn about(State(state): State<HttpState>) -> Response {
    let chrome = state.chrome.load();
    let canonical = state.chrome.canonical_url("/about");
    let view = LayoutContext::new(
        chrome.with_canonical(canonical).with_page_title("About"),
        AboutView,
    );
    render_template_response(AboutTemplate { view }, StatusCode::OK)
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.load())
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.posts.repo().health_check().await)
}
