use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use tower::ServiceExt;
use uuid::Uuid;

use postline::application::chrome::ChromeService;
use postline::application::generation::GenerationGateway;
use postline::application::posts::PostService;
use postline::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use postline::config::SiteSettings;
use postline::domain::entities::PostRecord;
use postline::infra::http::{ApiState, HttpState, RouterState, build_router};
use postline::infra::memory::InMemoryPostsRepo;

/// Repository whose every call times out.
struct Unreachable;

#[async_trait]
impl PostsRepo for Unreachable {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<PostRecord>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn search_posts(&self, _query: &str) -> Result<Vec<PostRecord>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn list_by_author(
        &self,
        _author: &str,
        _exclude: Uuid,
        _limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn count_posts(&self) -> Result<u64, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn create_post(&self, _params: CreatePostParams) -> Result<PostRecord, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn update_post(&self, _params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn delete_post(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::Timeout)
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Err(RepoError::Timeout)
    }
}

fn app_over(repo: Arc<dyn PostsRepo>) -> Router {
    let posts = PostService::new(repo);
    let site = SiteSettings {
        title: "Modern Blog".to_string(),
        description: "Posts by people, models and terminals".to_string(),
        canonical_base: "https://blog.example.com".to_string(),
    };
    build_router(RouterState {
        http: HttpState {
            posts: posts.clone(),
            chrome: Arc::new(ChromeService::new(site)),
        },
        api: ApiState {
            posts,
            generation: Arc::new(GenerationGateway::default()),
        },
    })
}

fn app() -> Router {
    app_over(Arc::new(InMemoryPostsRepo::seeded()))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (
        status,
        content_type,
        String::from_utf8_lossy(&bytes).into_owned(),
    )
}

#[tokio::test]
async fn home_lists_latest_posts() {
    let (status, content_type, body) = get(&app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.expect("content type").starts_with("text/html"));
    assert!(body.contains("Modern Blog"));
    assert!(body.contains("/posts/nextjs-15-new-features"));
    assert!(body.contains("https://blog.example.com/"));
}

#[tokio::test]
async fn posts_index_shows_every_post() {
    let (status, _, body) = get(&app(), "/posts").await;
    assert_eq!(status, StatusCode::OK);
    for slug in [
        "nextjs-15-new-features",
        "typescript-react-type-safety",
        "supabase-backend-development",
        "tailwind-css-best-practices",
        "react-server-components",
        "cli-tool-development",
    ] {
        assert!(body.contains(&format!("/posts/{slug}")), "missing {slug}");
    }
}

#[tokio::test]
async fn post_detail_renders_article() {
    let (status, _, body) = get(&app(), "/posts/supabase-backend-development").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Getting Started with Backend Development on Supabase"));
    assert!(body.contains("ホーム"));
    assert!(body.contains("https://blog.example.com/posts/supabase-backend-development"));
}

#[tokio::test]
async fn unknown_post_renders_not_found_page() {
    let (status, content_type, _) = get(&app(), "/posts/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.expect("content type").starts_with("text/html"));

    let (status, _, _) = get(&app(), "/nowhere/at/all").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_titles_and_bodies() {
    let (status, _, body) = get(&app(), "/search?q=tailwind").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/posts/tailwind-css-best-practices"));
    assert!(!body.contains("/posts/cli-tool-development"));

    let (status, _, body) = get(&app(), "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("/posts/tailwind-css-best-practices"));
}

#[tokio::test]
async fn about_page_renders() {
    let (status, _, body) = get(&app(), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("コンセプト"));
}

#[tokio::test]
async fn stylesheet_is_served_from_embedded_assets() {
    let (status, content_type, body) = get(&app(), "/static/styles.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.expect("content type").starts_with("text/css"));
    assert!(!body.is_empty());

    let (status, _, _) = get(&app(), "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reflects_repository_state() {
    let (status, _, _) = get(&app(), "/_health/db").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = get(&app_over(Arc::new(Unreachable)), "/_health/db").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn listing_degrades_when_repository_fails() {
    let app = app_over(Arc::new(Unreachable));
    let (status, _, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("まだ記事がありません"));

    let (status, _, _) = get(&app, "/posts/anything").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
