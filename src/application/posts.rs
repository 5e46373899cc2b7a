//! Post reads, writes and validation shared by every surface.

use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::domain::posts::{AUTHOR_MIN_CHARS, CONTENT_MIN_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::domain::slug::generate_slug;

pub const METRIC_POST_WRITES: &str = "postline_post_writes_total";
pub const METRIC_REPO_DEGRADED: &str = "postline_repo_degraded_total";

/// Number of same-author posts shown under a post.
pub const RELATED_POSTS_LIMIT: u32 = 3;
/// Upper bound for the "recent posts" statistic.
pub const RECENT_POSTS_CAP: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostField {
    Title,
    Author,
    Content,
}

impl PostField {
    pub fn as_str(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Author => "author",
            PostField::Content => "content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: PostField,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: PostField, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for PostServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => PostServiceError::NotFound,
            other => PostServiceError::Repo(other),
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|err| format!("{}: {}", err.field.as_str(), err.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub total_posts: u64,
    pub recent_posts_count: u64,
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostsRepo>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostsRepo>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> Arc<dyn PostsRepo> {
        self.repo.clone()
    }

    /// All posts, newest first. Repository failures degrade to an empty list.
    pub async fn list(&self) -> Vec<PostRecord> {
        match self.repo.list_posts().await {
            Ok(posts) => posts,
            Err(err) => {
                degraded("list", &err);
                Vec::new()
            }
        }
    }

    /// Substring search. Blank queries and repository failures yield no results.
    pub async fn search(&self, query: &str) -> Vec<PostRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.repo.search_posts(query).await {
            Ok(posts) => posts,
            Err(err) => {
                degraded("search", &err);
                Vec::new()
            }
        }
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        self.repo.find_by_slug(slug).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        self.repo.find_by_id(id).await
    }

    pub async fn related(&self, post: &PostRecord) -> Vec<PostRecord> {
        match self
            .repo
            .list_by_author(&post.author, post.id, RELATED_POSTS_LIMIT)
            .await
        {
            Ok(posts) => posts,
            Err(err) => {
                degraded("related", &err);
                Vec::new()
            }
        }
    }

    pub async fn create(&self, command: CreatePostCommand) -> Result<PostRecord, PostServiceError> {
        let title = command.title.trim().to_string();
        let content = command.content.trim().to_string();
        let author = command.author.trim().to_string();

        let mut errors = Vec::new();
        validate_title(&title, &mut errors);
        validate_author(&author, &mut errors);
        validate_content(&content, &mut errors);
        if !errors.is_empty() {
            return Err(PostServiceError::Validation(errors));
        }

        let params = CreatePostParams {
            slug: generate_slug(&title),
            title,
            content,
            author,
        };

        let post = self.repo.create_post(params).await?;
        counter!(METRIC_POST_WRITES, "op" => "create").increment(1);
        info!(
            target: "postline::posts",
            post_id = %post.id,
            slug = %post.slug,
            "post created"
        );
        Ok(post)
    }

    pub async fn update(&self, command: UpdatePostCommand) -> Result<PostRecord, PostServiceError> {
        let title = command.title.map(|value| value.trim().to_string());
        let content = command.content.map(|value| value.trim().to_string());
        let author = command.author.map(|value| value.trim().to_string());

        let mut errors = Vec::new();
        if let Some(title) = &title {
            validate_title(title, &mut errors);
        }
        if let Some(author) = &author {
            validate_author(author, &mut errors);
        }
        if let Some(content) = &content {
            validate_content(content, &mut errors);
        }
        if !errors.is_empty() {
            return Err(PostServiceError::Validation(errors));
        }

        let params = UpdatePostParams {
            id: command.id,
            slug: title.as_deref().map(generate_slug),
            title,
            content,
            author,
        };

        let post = self.repo.update_post(params).await?;
        counter!(METRIC_POST_WRITES, "op" => "update").increment(1);
        info!(
            target: "postline::posts",
            post_id = %post.id,
            slug = %post.slug,
            "post updated"
        );
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), PostServiceError> {
        self.repo.delete_post(id).await?;
        counter!(METRIC_POST_WRITES, "op" => "delete").increment(1);
        info!(target: "postline::posts", post_id = %id, "post deleted");
        Ok(())
    }

    pub async fn stats(&self) -> Result<PostStats, RepoError> {
        let total_posts = self.repo.count_posts().await?;
        Ok(PostStats {
            total_posts,
            recent_posts_count: total_posts.min(RECENT_POSTS_CAP),
        })
    }
}

fn degraded(op: &'static str, err: &RepoError) {
    counter!(METRIC_REPO_DEGRADED, "op" => op).increment(1);
    warn!(
        target: "postline::posts",
        op,
        error = %err,
        "repository call failed, serving empty result"
    );
}

fn validate_title(title: &str, errors: &mut Vec<FieldError>) {
    let len = title.chars().count();
    if len == 0 {
        errors.push(FieldError::new(PostField::Title, "タイトルは必須です"));
    } else if len < TITLE_MIN_CHARS {
        errors.push(FieldError::new(
            PostField::Title,
            "タイトルは3文字以上で入力してください",
        ));
    } else if len > TITLE_MAX_CHARS {
        errors.push(FieldError::new(
            PostField::Title,
            "タイトルは100文字以内で入力してください",
        ));
    }
}

fn validate_author(author: &str, errors: &mut Vec<FieldError>) {
    let len = author.chars().count();
    if len == 0 {
        errors.push(FieldError::new(PostField::Author, "著者名は必須です"));
    } else if len < AUTHOR_MIN_CHARS {
        errors.push(FieldError::new(
            PostField::Author,
            "著者名は2文字以上で入力してください",
        ));
    }
}

fn validate_content(content: &str, errors: &mut Vec<FieldError>) {
    let len = content.chars().count();
    if len == 0 {
        errors.push(FieldError::new(PostField::Content, "本文は必須です"));
    } else if len < CONTENT_MIN_CHARS {
        errors.push(FieldError::new(
            PostField::Content,
            "本文は10文字以上で入力してください",
        ));
    }
}
