use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use postline::application::chrome::ChromeService;
use postline::application::generation::{
    ContentGenerator, GenerationError, GenerationGateway, Provider,
};
use postline::application::posts::PostService;
use postline::config::SiteSettings;
use postline::infra::http::{ApiState, HttpState, RouterState, build_router};
use postline::infra::memory::InMemoryPostsRepo;

struct Echo(Provider);

#[async_trait]
impl ContentGenerator for Echo {
    fn provider(&self) -> Provider {
        self.0
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(format!("[{}] {prompt}", self.0))
    }
}

struct Broken;

#[async_trait]
impl ContentGenerator for Broken {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Upstream {
            provider: Provider::OpenAi,
            message: "status 500 body boom".to_string(),
        })
    }
}

fn site() -> SiteSettings {
    SiteSettings {
        title: "Modern Blog".to_string(),
        description: "Posts by people, models and terminals".to_string(),
        canonical_base: "http://localhost:3000".to_string(),
    }
}

fn app_with(gateway: GenerationGateway) -> Router {
    let posts = PostService::new(Arc::new(InMemoryPostsRepo::seeded()));
    build_router(RouterState {
        http: HttpState {
            posts: posts.clone(),
            chrome: Arc::new(ChromeService::new(site())),
        },
        api: ApiState {
            posts,
            generation: Arc::new(gateway),
        },
    })
}

fn app() -> Router {
    app_with(GenerationGateway::new(
        Some(Arc::new(Echo(Provider::OpenAi))),
        None,
    ))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn lists_seeded_posts_newest_first() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().expect("array");
    assert_eq!(posts.len(), 6);
    assert_eq!(posts[0]["slug"], "nextjs-15-new-features");
}

#[tokio::test]
async fn create_then_fetch_by_id_and_slug() {
    let app = app();
    let (status, created) = call(
        &app,
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "  Shipping Rust Services ",
            "content": "A long enough body about shipping services.",
            "author": "CLI Operator"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Shipping Rust Services");
    assert_eq!(created["slug"], "shipping-rust-services");

    let id = created["id"].as_str().expect("id");
    let (status, by_id) = call(&app, Method::GET, &format!("/api/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["author"], "CLI Operator");

    let (status, by_slug) = call(
        &app,
        Method::GET,
        "/api/posts/slug/shipping-rust-services",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["id"], created["id"]);

    let (_, stats) = call(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(stats["totalPosts"], 7);
    assert_eq!(stats["recentPostsCount"], 7);
}

#[tokio::test]
async fn create_requires_every_field() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/posts",
        Some(json!({"title": "Only a title", "author": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(
        body["error"]["message"],
        "Title, content, and author are required"
    );
}

#[tokio::test]
async fn create_reports_field_validation() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/posts",
        Some(json!({"title": "Hi", "content": "short", "author": "A"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
    let hint = body["error"]["hint"].as_str().expect("hint");
    assert!(hint.contains("title"), "hint was {hint}");
    assert!(hint.contains("content"), "hint was {hint}");
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::GET,
        "/api/posts/00000000-0000-0000-0000-0000000000ff",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Post not found");

    let (status, _) = call(&app, Method::GET, "/api/posts/slug/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_round() {
    let app = app();
    let uri = "/api/posts/00000000-0000-0000-0000-000000000002";
    let (status, updated) = call(
        &app,
        Method::PUT,
        uri,
        Some(json!({"title": "Renamed TypeScript Post"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "renamed-typescript-post");
    assert_eq!(updated["author"], "AI");

    let (status, body) = call(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully");

    let (status, _) = call(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/posts/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Post not found");

    let (status, body) = call(&app, Method::DELETE, "/api/posts/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Post not found");
}

#[tokio::test]
async fn malformed_json_body_uses_error_envelope() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/posts")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(body["error"]["message"], "Invalid JSON body");
    assert!(body["error"]["hint"].is_string());
}

#[tokio::test]
async fn blank_update_fields_keep_stored_values() {
    let app = app();
    let (status, updated) = call(
        &app,
        Method::PUT,
        "/api/posts/00000000-0000-0000-0000-000000000001",
        Some(json!({"title": "", "content": "Updated body text here", "author": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "A Thorough Tour of the Next.js 15 Release");
    assert_eq!(updated["content"], "Updated body text here");
    assert_eq!(updated["author"], "Human");
}

#[tokio::test]
async fn generate_routes_to_provider() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({"prompt": "Write about borrowing"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "[openai] Write about borrowing");
    assert_eq!(body["provider"], "openai");
}

#[tokio::test]
async fn generate_validates_input() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Prompt is required");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({"prompt": "hi", "provider": "gemini"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_provider");
}

#[tokio::test]
async fn generate_without_key_is_server_error() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({"prompt": "hi", "provider": "anthropic"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Anthropic API key not configured");
}

#[tokio::test]
async fn generate_upstream_failure_is_bad_gateway() {
    let app = app_with(GenerationGateway::new(Some(Arc::new(Broken)), None));
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/generate",
        Some(json!({"prompt": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["message"], "Content generation failed");
    assert!(
        body["error"]["hint"]
            .as_str()
            .expect("hint")
            .contains("boom")
    );
}
