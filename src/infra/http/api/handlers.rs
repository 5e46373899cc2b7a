use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::generation::{GenerationError, Provider};
use crate::application::posts::{CreatePostCommand, PostServiceError, UpdatePostCommand};
use crate::application::repos::RepoError;

use super::error::{ApiError, codes};
use super::models::*;
use super::state::ApiState;

/// -------- Posts --------
pub async fn list_posts(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.posts.list().await)
}

pub async fn get_post(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = post_id(id)?;
    match state.posts.find_by_id(id).await.map_err(repo_to_api)? {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::not_found("Post not found")),
    }
}

pub async fn get_post_by_slug(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.posts.find_by_slug(&slug).await.map_err(repo_to_api)? {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::not_found("Post not found")),
    }
}

pub async fn create_post(
    State(state): State<ApiState>,
    payload: Result<Json<PostCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    let (Some(title), Some(content), Some(author)) = (
        present(payload.title),
        present(payload.content),
        present(payload.author),
    ) else {
        return Err(ApiError::bad_request(
            "Title, content, and author are required",
            None,
        ));
    };

    let post = state
        .posts
        .create(CreatePostCommand {
            title,
            content,
            author,
        })
        .await
        .map_err(post_to_api)?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PostUpdateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = post_id(id)?;
    let payload = json_body(payload)?;
    let post = state
        .posts
        .update(UpdatePostCommand {
            id,
            title: present(payload.title),
            content: present(payload.content),
            author: present(payload.author),
        })
        .await
        .map_err(post_to_api)?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = post_id(id)?;
    state.posts.delete(id).await.map_err(post_to_api)?;
    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

/// -------- Stats --------
pub async fn stats(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.posts.stats().await.map_err(repo_to_api)?;
    Ok(Json(stats))
}

/// -------- Generation --------
pub async fn generate(
    State(state): State<ApiState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    let Some(prompt) = present(payload.prompt) else {
        return Err(ApiError::bad_request("Prompt is required", None));
    };

    let provider = match payload.provider.as_deref() {
        None => Provider::default(),
        Some(raw) => raw.parse::<Provider>().map_err(|err| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_PROVIDER,
                "Invalid provider",
                Some(format!("{err}; use \"openai\" or \"anthropic\"")),
            )
        })?,
    };

    let generated = state
        .generation
        .generate(&prompt, provider)
        .await
        .map_err(generation_to_api)?;

    Ok(Json(generated))
}

/// -------- Helper conversions --------
// An unparseable id cannot name a stored post.
fn post_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("Post not found"))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| {
            ApiError::bad_request("Invalid JSON body", Some(rejection.body_text()))
        })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::NotFound => ApiError::not_found("Post not found"),
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid input",
            Some(message),
        ),
        RepoError::Integrity { message } => ApiError::new(
            StatusCode::CONFLICT,
            codes::INTEGRITY,
            "Integrity constraint violated",
            Some(message),
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            "Database timeout",
            None,
        ),
        RepoError::Persistence(msg) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
            Some(msg),
        ),
    }
}

fn post_to_api(err: PostServiceError) -> ApiError {
    match err {
        PostServiceError::Validation(errors) => {
            let hint = errors
                .iter()
                .map(|error| format!("{}: {}", error.field.as_str(), error.message))
                .collect::<Vec<_>>()
                .join("; ");
            ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::INVALID_INPUT,
                "Invalid post",
                Some(hint),
            )
        }
        PostServiceError::NotFound => ApiError::not_found("Post not found"),
        PostServiceError::Repo(repo) => repo_to_api(repo),
    }
}

fn generation_to_api(err: GenerationError) -> ApiError {
    match err {
        GenerationError::MissingPrompt => ApiError::bad_request("Prompt is required", None),
        GenerationError::MissingCredential(provider) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::MISSING_CREDENTIAL,
            match provider {
                Provider::OpenAi => "OpenAI API key not configured",
                Provider::Anthropic => "Anthropic API key not configured",
            },
            None,
        ),
        other @ (GenerationError::Upstream { .. } | GenerationError::Transport { .. }) => {
            ApiError::new(
                StatusCode::BAD_GATEWAY,
                codes::UPSTREAM,
                "Content generation failed",
                Some(other.to_string()),
            )
        }
    }
}
