use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use tower::ServiceExt;

use postline::application::admin::{AdminChromeService, AdminDashboardService};
use postline::application::generation::{
    ContentGenerator, GenerationError, GenerationGateway, Provider,
};
use postline::application::posts::PostService;
use postline::config::SiteSettings;
use postline::infra::http::{AdminState, build_admin_router};
use postline::infra::memory::InMemoryPostsRepo;

struct Drafter;

#[async_trait]
impl ContentGenerator for Drafter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(format!("DRAFT for {prompt}"))
    }
}

const TYPESCRIPT_POST: &str = "00000000-0000-0000-0000-000000000002";

fn admin() -> (Router, PostService) {
    let site = SiteSettings {
        title: "Modern Blog".to_string(),
        description: "Posts by people, models and terminals".to_string(),
        canonical_base: "https://blog.example.com".to_string(),
    };
    let posts = PostService::new(Arc::new(InMemoryPostsRepo::seeded()));
    let state = AdminState {
        posts: posts.clone(),
        chrome: Arc::new(AdminChromeService::new(site.clone())),
        dashboard: Arc::new(AdminDashboardService::new(
            posts.clone(),
            site.canonical_base.clone(),
        )),
        generation: Arc::new(GenerationGateway::new(None, Some(Arc::new(Drafter)))),
    };
    (build_admin_router(state), posts)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    form: Option<&str>,
) -> (StatusCode, Option<String>, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(encoded) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(encoded.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("router should respond");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, location, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn dashboard_shows_stats_and_posts() {
    let (app, _) = admin();
    let (status, _, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("総記事数"));
    assert!(body.contains("https://blog.example.com/posts/nextjs-15-new-features"));
    assert!(body.contains(&format!("/posts/{TYPESCRIPT_POST}/edit")));
}

#[tokio::test]
async fn dashboard_filters_by_author_kind() {
    let (app, _) = admin();
    let (status, _, body) = send(&app, Method::GET, "/?author=cli", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/posts/cli-tool-development"));
    assert!(!body.contains("/posts/nextjs-15-new-features"));

    let (status, _, body) = send(&app, Method::GET, "/?author=robots&page=zero", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/posts/nextjs-15-new-features"));
}

#[tokio::test]
async fn new_post_form_renders() {
    let (app, _) = admin();
    let (status, _, body) = send(&app, Method::GET, "/posts/new", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("新規投稿"));
    assert!(body.contains("/posts/create"));
}

#[tokio::test]
async fn invalid_create_rerenders_form_with_errors() {
    let (app, posts) = admin();
    let (status, location, body) = send(
        &app,
        Method::POST,
        "/posts/create",
        Some("title=Hi&author=Al&content=short"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(location.is_none());
    assert!(body.contains("タイトルは3文字以上で入力してください"));
    assert!(body.contains("本文は10文字以上で入力してください"));
    assert_eq!(posts.list().await.len(), 6);
}

#[tokio::test]
async fn valid_create_redirects_to_dashboard() {
    let (app, posts) = admin();
    let (status, location, _) = send(
        &app,
        Method::POST,
        "/posts/create",
        Some("title=Admin+Written+Post&author=Editor&content=Ten+or+more+characters+here"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let listed = posts.list().await;
    assert_eq!(listed.len(), 7);
    assert_eq!(listed[0].slug, "admin-written-post");
}

#[tokio::test]
async fn edit_updates_existing_post() {
    let (app, posts) = admin();
    let uri = format!("/posts/{TYPESCRIPT_POST}/edit");
    let (status, _, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("記事を編集"));
    assert!(body.contains("Type-Safe React Development with TypeScript"));

    let (status, location, _) = send(
        &app,
        Method::POST,
        &uri,
        Some("title=Strict+TypeScript&author=AI&content=Updated+body+for+the+post"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let updated = posts
        .find_by_slug("strict-typescript")
        .await
        .expect("lookup")
        .expect("renamed post");
    assert_eq!(updated.content, "Updated body for the post");
}

#[tokio::test]
async fn generate_fills_body_from_title() {
    let (app, _) = admin();
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/posts/generate",
        Some("title=Ownership&author=Editor&content=&provider=anthropic"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Anthropicで本文を生成しました"));
    assert!(body.contains("DRAFT for"));
}

#[tokio::test]
async fn generate_reports_missing_title_and_key() {
    let (app, _) = admin();
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/posts/generate",
        Some("title=&provider=anthropic"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("タイトルを入力してください"));

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/posts/generate",
        Some("title=Ownership&provider=openai"),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("OpenAI API key not configured"));
}

#[tokio::test]
async fn delete_confirms_then_removes() {
    let (app, posts) = admin();
    let uri = format!("/posts/{TYPESCRIPT_POST}/delete");
    let (status, _, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("この操作は取り消せません"));

    let (status, location, _) = send(&app, Method::POST, &uri, Some("")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(posts.list().await.len(), 5);

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_health_and_assets() {
    let (app, _) = admin();
    let (status, _, _) = send(&app, Method::GET, "/_health/db", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, "/static/styles.css", None).await;
    assert_eq!(status, StatusCode::OK);
}
