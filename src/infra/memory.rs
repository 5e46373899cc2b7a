//! In-memory post repository backing the `mock` data source.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, PostsRepo, RepoError, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::domain::posts::fixtures;

/// Posts kept newest first; inserts go to the front.
#[derive(Debug, Default)]
pub struct InMemoryPostsRepo {
    posts: RwLock<Vec<PostRecord>>,
}

impl InMemoryPostsRepo {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        let mut posts = posts;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Repository preloaded with the bundled fixture posts.
    pub fn seeded() -> Self {
        Self::new(fixtures())
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[async_trait]
impl PostsRepo for InMemoryPostsRepo {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.slug == slug).cloned())
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<PostRecord>, RepoError> {
        let needle = query.to_lowercase();
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|post| {
                contains_ignore_case(&post.title, &needle)
                    || contains_ignore_case(&post.content, &needle)
            })
            .cloned()
            .collect())
    }

    async fn list_by_author(
        &self,
        author: &str,
        exclude: Uuid,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|post| post.author == author && post.id != exclude)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_posts(&self) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.len() as u64)
    }

    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let post = PostRecord {
            id: Uuid::new_v4(),
            title: params.title,
            slug: params.slug,
            content: params.content,
            author: params.author,
            created_at: now,
            updated_at: now,
        };
        self.posts.write().await.insert(0, post.clone());
        Ok(post)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == params.id)
            .ok_or(RepoError::NotFound)?;

        if let Some(title) = params.title {
            post.title = title;
        }
        if let Some(slug) = params.slug {
            post.slug = slug;
        }
        if let Some(content) = params.content {
            post.content = content;
        }
        if let Some(author) = params.author {
            post.author = author;
        }
        post.updated_at = OffsetDateTime::now_utc();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
