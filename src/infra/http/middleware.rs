use std::time::Instant;

use axum::{
    body::Body,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

const LOG_TARGET: &str = "postline::http::response";

/// Admin paths under `/posts/` that do not name a post.
const ADMIN_POST_ACTIONS: &[&str] = &["new", "create", "generate"];

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext {
        request_id: Uuid::new_v4().to_string(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

/// Logs failed requests and successful post writes, tagged with the post they address.
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();
    let post = post_ref(uri.path()).unwrap_or("");

    if status.is_success() {
        if is_post_write(&method, uri.path()) {
            info!(
                target: LOG_TARGET,
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                post = post,
                elapsed_ms = elapsed_ms,
                request_id = request_id,
                "post written",
            );
        }
        return response;
    }

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (source, messages) = match response.extensions_mut().remove::<ErrorReport>() {
        Some(report) => (report.source, report.messages),
        None => ("unknown", Vec::new()),
    };
    let detail = messages
        .first()
        .cloned()
        .unwrap_or_else(|| "no diagnostic available".to_string());

    if status.is_server_error() {
        error!(
            target: LOG_TARGET,
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            post = post,
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            chain = ?messages,
            request_id = request_id,
            "request failed",
        );
    } else {
        warn!(
            target: LOG_TARGET,
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            post = post,
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            chain = ?messages,
            request_id = request_id,
            "client request error",
        );
    }

    response
}

/// The post id or slug a path addresses, if any.
///
/// Covers `/posts/{slug}`, `/posts/{id}/edit`, `/api/posts/{id}` and
/// `/api/posts/slug/{slug}`.
fn post_ref(path: &str) -> Option<&str> {
    let mut segments = path.trim_matches('/').split('/');
    let first = segments.next()?;
    let posts = if first == "api" { segments.next()? } else { first };
    if posts != "posts" {
        return None;
    }
    let candidate = match segments.next()? {
        "slug" => segments.next()?,
        other => other,
    };
    if candidate.is_empty() || ADMIN_POST_ACTIONS.contains(&candidate) {
        return None;
    }
    Some(candidate)
}

fn is_post_write(method: &Method, path: &str) -> bool {
    let mutating = matches!(*method, Method::POST | Method::PUT | Method::DELETE);
    let posts_path = path.starts_with("/api/posts") || path.starts_with("/posts/");
    mutating && posts_path && !path.ends_with("/generate")
}
