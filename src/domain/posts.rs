mod data;

use time::{format_description::FormatItem, macros::format_description};
use uuid::Uuid;

use crate::domain::entities::PostRecord;

pub use data::FIXTURE_POSTS;

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");

/// Character budget for public post card excerpts.
pub const CARD_EXCERPT_CHARS: usize = 200;
/// Character budget for admin listing excerpts.
pub const ADMIN_EXCERPT_CHARS: usize = 150;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const AUTHOR_MIN_CHARS: usize = 2;
pub const CONTENT_MIN_CHARS: usize = 10;

/// Static post used to seed the in-memory data source.
#[derive(Clone)]
pub struct FixturePost {
    pub id: u128,
    pub title: &'static str,
    pub slug: &'static str,
    pub author: &'static str,
    pub created_at: time::OffsetDateTime,
    pub content: &'static str,
}

impl From<&FixturePost> for PostRecord {
    fn from(post: &FixturePost) -> Self {
        Self {
            id: Uuid::from_u128(post.id),
            title: post.title.to_string(),
            slug: post.slug.to_string(),
            content: post.content.to_string(),
            author: post.author.to_string(),
            created_at: post.created_at,
            updated_at: post.created_at,
        }
    }
}

/// Fixture posts as records, newest first.
pub fn fixtures() -> Vec<PostRecord> {
    let mut posts: Vec<PostRecord> = FIXTURE_POSTS.iter().map(PostRecord::from).collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

/// First `limit` characters of `content` followed by an ellipsis.
pub fn excerpt(content: &str, limit: usize) -> String {
    let mut out: String = content.chars().take(limit).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::author::{AuthorKind, author_kind};
    use crate::domain::slug::generate_slug;

    #[test]
    fn excerpt_truncates_on_character_boundaries() {
        assert_eq!(excerpt("short", 200), "short...");
        assert_eq!(excerpt("日本語のテキスト", 3), "日本語...");
    }

    #[test]
    fn fixtures_are_sorted_newest_first() {
        let posts = fixtures();
        assert_eq!(posts.len(), 6);
        assert!(
            posts
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
        assert_eq!(posts[0].slug, "nextjs-15-new-features");
        assert_eq!(posts[5].slug, "cli-tool-development");
    }

    #[test]
    fn fixtures_cover_every_author_kind() {
        let kinds: Vec<AuthorKind> = fixtures()
            .iter()
            .map(|post| author_kind(&post.author))
            .collect();
        for kind in [AuthorKind::Ai, AuthorKind::Cli, AuthorKind::Human] {
            assert_eq!(kinds.iter().filter(|k| **k == kind).count(), 2);
        }
    }

    #[test]
    fn fixture_slugs_are_already_canonical() {
        for post in fixtures() {
            assert_eq!(generate_slug(&post.slug), post.slug);
        }
    }
}
