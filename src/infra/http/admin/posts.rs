//! Post create, edit, generate and delete handlers for the admin listener.

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    application::{
        error::HttpError,
        generation::{GenerationError, Provider, title_prompt},
        posts::{CreatePostCommand, FieldError, PostServiceError, UpdatePostCommand},
    },
    domain::entities::PostRecord,
    infra::http::repo_error_to_http,
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::AdminState;
use super::forms::{AdminGenerateForm, AdminPostForm};

const NEW_POST_PATH: &str = "/posts/new";

struct FormValues {
    title: String,
    author: String,
    content: String,
    provider: String,
}

impl FormValues {
    fn empty() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            content: String::new(),
            provider: Provider::default().as_str().to_string(),
        }
    }

    fn from_record(post: &PostRecord) -> Self {
        Self {
            title: post.title.clone(),
            author: post.author.clone(),
            content: post.content.clone(),
            provider: Provider::default().as_str().to_string(),
        }
    }

    fn from_form(form: AdminPostForm) -> Self {
        Self {
            title: form.title,
            author: form.author,
            content: form.content,
            provider: provider_or_default(form.provider.as_deref()),
        }
    }
}

fn provider_or_default(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(Provider::default().as_str())
        .to_string()
}

fn form_view(
    post_id: Option<Uuid>,
    values: FormValues,
    errors: &[FieldError],
    notice: Option<String>,
) -> admin_views::AdminPostFormView {
    let (heading, form_action, submit_label) = match post_id {
        Some(id) => (
            "記事を編集".to_string(),
            format!("/posts/{id}/edit"),
            "更新".to_string(),
        ),
        None => (
            "新規投稿".to_string(),
            "/posts/create".to_string(),
            "投稿".to_string(),
        ),
    };

    admin_views::AdminPostFormView {
        heading,
        form_action,
        generate_action: "/posts/generate".to_string(),
        submit_label,
        title: values.title,
        author: values.author,
        content: values.content,
        provider: values.provider,
        errors: errors
            .iter()
            .map(|error| admin_views::AdminFieldErrorView {
                field: error.field.as_str(),
                message: error.message,
            })
            .collect(),
        notice,
        post_id: post_id.map(|id| id.to_string()),
        cancel_href: "/".to_string(),
    }
}

fn render_form(
    state: &AdminState,
    active_path: &str,
    content: admin_views::AdminPostFormView,
    status: StatusCode,
) -> Response {
    let chrome = state.chrome.load(active_path);
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminPostFormTemplate { view }, status)
}

fn post_not_found(source: &'static str, id: Uuid) -> Response {
    HttpError::new(
        source,
        StatusCode::NOT_FOUND,
        "Post not found",
        format!("post `{id}` does not exist"),
    )
    .into_response()
}

fn post_error_response(source: &'static str, id: Option<Uuid>, err: PostServiceError) -> Response {
    match err {
        PostServiceError::NotFound => match id {
            Some(id) => post_not_found(source, id),
            None => HttpError::new(
                source,
                StatusCode::NOT_FOUND,
                "Post not found",
                "post disappeared during the request",
            )
            .into_response(),
        },
        PostServiceError::Repo(err) => repo_error_to_http(source, err).into_response(),
        PostServiceError::Validation(errors) => HttpError::new(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid post",
            format!("{} invalid field(s)", errors.len()),
        )
        .into_response(),
    }
}

async fn load_post(state: &AdminState, source: &'static str, id: Uuid) -> Result<PostRecord, Response> {
    match state.posts.find_by_id(id).await {
        Ok(Some(post)) => Ok(post),
        Ok(None) => Err(post_not_found(source, id)),
        Err(err) => Err(repo_error_to_http(source, err).into_response()),
    }
}

pub(crate) async fn admin_post_new(State(state): State<AdminState>) -> Response {
    let content = form_view(None, FormValues::empty(), &[], None);
    render_form(&state, NEW_POST_PATH, content, StatusCode::OK)
}

pub(crate) async fn admin_post_create(
    State(state): State<AdminState>,
    Form(form): Form<AdminPostForm>,
) -> Response {
    let command = CreatePostCommand {
        title: form.title.clone(),
        content: form.content.clone(),
        author: form.author.clone(),
    };

    match state.posts.create(command).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(PostServiceError::Validation(errors)) => {
            let content = form_view(None, FormValues::from_form(form), &errors, None);
            render_form(
                &state,
                NEW_POST_PATH,
                content,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(err) => post_error_response("infra::http::admin_post_create", None, err),
    }
}

pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    let post = match load_post(&state, "infra::http::admin_post_edit", id).await {
        Ok(post) => post,
        Err(response) => return response,
    };

    let content = form_view(Some(id), FormValues::from_record(&post), &[], None);
    render_form(&state, "/", content, StatusCode::OK)
}

pub(crate) async fn admin_post_update(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    Form(form): Form<AdminPostForm>,
) -> Response {
    let command = UpdatePostCommand {
        id,
        title: Some(form.title.clone()),
        content: Some(form.content.clone()),
        author: Some(form.author.clone()),
    };

    match state.posts.update(command).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(PostServiceError::Validation(errors)) => {
            let content = form_view(Some(id), FormValues::from_form(form), &errors, None);
            render_form(&state, "/", content, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(err) => post_error_response("infra::http::admin_post_update", Some(id), err),
    }
}

/// Draft a body from the title and hand the form back for review.
pub(crate) async fn admin_post_generate(
    State(state): State<AdminState>,
    Form(form): Form<AdminGenerateForm>,
) -> Response {
    let post_id = form
        .post_id
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| Uuid::parse_str(raw).ok());
    let active_path = if post_id.is_some() { "/" } else { NEW_POST_PATH };

    let mut values = FormValues {
        title: form.title,
        author: form.author,
        content: form.content,
        provider: provider_or_default(form.provider.as_deref()),
    };

    let provider = match values.provider.parse::<Provider>() {
        Ok(provider) => provider,
        Err(err) => {
            let content = form_view(post_id, values, &[], Some(err.to_string()));
            return render_form(
                &state,
                active_path,
                content,
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    let title = values.title.trim().to_string();
    if title.is_empty() {
        let content = form_view(
            post_id,
            values,
            &[],
            Some("タイトルを入力してください".to_string()),
        );
        return render_form(
            &state,
            active_path,
            content,
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    match state
        .generation
        .generate(&title_prompt(&title), provider)
        .await
    {
        Ok(generated) => {
            values.content = generated.content;
            let notice = format!("{}で本文を生成しました", provider.display_name());
            let content = form_view(post_id, values, &[], Some(notice));
            render_form(&state, active_path, content, StatusCode::OK)
        }
        Err(err) => {
            let status = match err {
                GenerationError::MissingPrompt => StatusCode::UNPROCESSABLE_ENTITY,
                GenerationError::MissingCredential(_) => StatusCode::SERVICE_UNAVAILABLE,
                GenerationError::Upstream { .. } | GenerationError::Transport { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            };
            let content = form_view(post_id, values, &[], Some(err.to_string()));
            render_form(&state, active_path, content, status)
        }
    }
}

pub(crate) async fn admin_post_delete_confirm(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    let post = match load_post(&state, "infra::http::admin_post_delete_confirm", id).await {
        Ok(post) => post,
        Err(response) => return response,
    };

    let chrome = state.chrome.load("/");
    let content = admin_views::AdminPostDeleteView {
        title: post.title,
        action: format!("/posts/{id}/delete"),
        cancel_href: "/".to_string(),
    };
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminPostDeleteTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_delete(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.posts.delete(id).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => post_error_response("infra::http::admin_post_delete", Some(id), err),
    }
}
