use url::form_urlencoded;

use crate::application::posts::PostService;
use crate::domain::author::{AuthorFilter, AuthorKind, author_kind, classify_author};
use crate::domain::entities::PostRecord;
use crate::domain::posts::{ADMIN_EXCERPT_CHARS, HUMAN_DATE_FORMAT, excerpt};
use crate::domain::reading::estimate_minutes;
use crate::presentation::admin::views::{
    AdminDashboardPanelView, AdminDashboardView, AdminFilterOptionView, AdminMetricView,
    AdminPageLinkView, AdminPaginationView, AdminPostRowView,
};

pub const POSTS_PER_PAGE: usize = 6;

const FILTER_OPTIONS: &[(AuthorFilter, &str)] = &[
    (AuthorFilter::All, "全ての著者"),
    (AuthorFilter::Only(AuthorKind::Ai), "AI記事"),
    (AuthorFilter::Only(AuthorKind::Cli), "CLI記事"),
    (AuthorFilter::Only(AuthorKind::Human), "人間記事"),
];

/// Listing parameters taken from the dashboard query string.
#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub search: String,
    pub author: AuthorFilter,
    pub page: usize,
}

/// Counts by author kind; `human` is whatever the other two rules leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthorStats {
    pub total: u64,
    pub ai: u64,
    pub cli: u64,
    pub human: u64,
}

impl AuthorStats {
    pub fn from_posts(posts: &[PostRecord]) -> Self {
        let total = posts.len() as u64;
        let (ai, cli) = posts
            .iter()
            .fold((0, 0), |(ai, cli), post| match author_kind(&post.author) {
                AuthorKind::Ai => (ai + 1, cli),
                AuthorKind::Cli => (ai, cli + 1),
                AuthorKind::Human => (ai, cli),
            });
        Self {
            total,
            ai,
            cli,
            human: total.saturating_sub(ai + cli),
        }
    }
}

/// Share of `total`, rounded half up; 0 when there is nothing to divide.
pub fn percent_of(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (count * 200 + total) / (2 * total)
}

/// Number of pages needed for `items`, never less than one.
pub fn total_pages(items: usize) -> usize {
    items.div_ceil(POSTS_PER_PAGE).max(1)
}

#[derive(Clone)]
pub struct AdminDashboardService {
    posts: PostService,
    public_base: String,
}

impl AdminDashboardService {
    /// `public_base` is the public site origin used for preview links.
    pub fn new(posts: PostService, public_base: impl Into<String>) -> Self {
        Self {
            posts,
            public_base: public_base.into(),
        }
    }

    pub async fn overview(&self, query: &DashboardQuery) -> AdminDashboardView {
        let posts = self.posts.list().await;
        let stats = AuthorStats::from_posts(&posts);

        let needle = query.search.trim().to_lowercase();
        let filtered: Vec<&PostRecord> = posts
            .iter()
            .filter(|post| query.author.matches(&post.author))
            .filter(|post| {
                needle.is_empty()
                    || post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
                    || post.author.to_lowercase().contains(&needle)
            })
            .collect();

        let total = total_pages(filtered.len());
        let current = query.page.clamp(1, total);
        let rows = filtered
            .iter()
            .skip((current - 1) * POSTS_PER_PAGE)
            .take(POSTS_PER_PAGE)
            .map(|post| row_view(post, &self.public_base))
            .collect();

        let filtering = !needle.is_empty() || query.author != AuthorFilter::All;
        let (empty_title, empty_message) = if filtering {
            (
                "記事が見つかりません",
                "検索条件やフィルターを変更してみてください。",
            )
        } else {
            (
                "まだ記事がありません",
                "最初の記事を投稿してブログを始めましょう。",
            )
        };

        AdminDashboardView {
            title: "管理画面".to_string(),
            panels: vec![stats_panel(&stats)],
            search: query.search.clone(),
            filters: FILTER_OPTIONS
                .iter()
                .map(|(filter, label)| AdminFilterOptionView {
                    value: filter.as_str(),
                    label: *label,
                    is_active: *filter == query.author,
                })
                .collect(),
            posts: rows,
            pagination: pagination_view(query, current, total),
            empty_title: empty_title.to_string(),
            empty_message: empty_message.to_string(),
            new_post_href: "/posts/new".to_string(),
        }
    }
}

fn stats_panel(stats: &AuthorStats) -> AdminDashboardPanelView {
    let share = |count: u64| Some(format!("{}% of total", percent_of(count, stats.total)));
    AdminDashboardPanelView {
        title: "Posts".to_string(),
        caption: "Authorship across every post".to_string(),
        metrics: vec![
            AdminMetricView {
                label: "総記事数".to_string(),
                icon: "file-text",
                value: stats.total,
                hint: Some("全ての記事".to_string()),
            },
            AdminMetricView {
                label: "AI記事".to_string(),
                icon: AuthorKind::Ai.icon(),
                value: stats.ai,
                hint: share(stats.ai),
            },
            AdminMetricView {
                label: "CLI記事".to_string(),
                icon: AuthorKind::Cli.icon(),
                value: stats.cli,
                hint: share(stats.cli),
            },
            AdminMetricView {
                label: "人間記事".to_string(),
                icon: AuthorKind::Human.icon(),
                value: stats.human,
                hint: share(stats.human),
            },
        ],
        empty_message: "No posts yet.".to_string(),
    }
}

fn row_view(post: &PostRecord, public_base: &str) -> AdminPostRowView {
    let id = post.id.to_string();
    AdminPostRowView {
        title: post.title.clone(),
        author: post.author.clone(),
        badge: classify_author(&post.author),
        excerpt: excerpt(&post.content, ADMIN_EXCERPT_CHARS),
        reading_minutes: estimate_minutes(&post.content),
        display_date: post.created_at.format(HUMAN_DATE_FORMAT).unwrap_or_default(),
        preview_href: format!("{public_base}/posts/{}", post.slug),
        edit_href: format!("/posts/{id}/edit"),
        delete_href: format!("/posts/{id}/delete"),
        id,
    }
}

fn page_href(query: &DashboardQuery, page: usize) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let search = query.search.trim();
    if !search.is_empty() {
        serializer.append_pair("q", search);
    }
    if query.author != AuthorFilter::All {
        serializer.append_pair("author", query.author.as_str());
    }
    serializer.append_pair("page", &page.to_string());
    format!("/?{}", serializer.finish())
}

fn pagination_view(query: &DashboardQuery, current: usize, total: usize) -> AdminPaginationView {
    AdminPaginationView {
        current,
        total,
        previous_href: (current > 1).then(|| page_href(query, current - 1)),
        next_href: (current < total).then(|| page_href(query, current + 1)),
        pages: (1..=total)
            .map(|number| AdminPageLinkView {
                number,
                href: page_href(query, number),
                is_current: number == current,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::posts::CreatePostCommand;
    use crate::domain::posts::fixtures;
    use crate::infra::memory::InMemoryPostsRepo;

    fn service() -> (AdminDashboardService, PostService) {
        let posts = PostService::new(Arc::new(InMemoryPostsRepo::seeded()));
        (
            AdminDashboardService::new(posts.clone(), "http://localhost:3000"),
            posts,
        )
    }

    #[test]
    fn stats_partition_fixture_authors() {
        let stats = AuthorStats::from_posts(&fixtures());
        assert_eq!(
            stats,
            AuthorStats {
                total: 6,
                ai: 2,
                cli: 2,
                human: 2
            }
        );
    }

    #[test]
    fn percentages_round_half_up() {
        assert_eq!(percent_of(2, 6), 33);
        assert_eq!(percent_of(1, 8), 13);
        assert_eq!(percent_of(5, 0), 0);
        assert_eq!(percent_of(3, 3), 100);
    }

    #[tokio::test]
    async fn filters_by_author_kind_and_search() {
        let (dashboard, _) = service();
        let view = dashboard
            .overview(&DashboardQuery {
                author: AuthorFilter::Only(AuthorKind::Cli),
                ..Default::default()
            })
            .await;
        assert_eq!(view.posts.len(), 2);
        assert!(view.posts.iter().all(|row| row.badge.kind == AuthorKind::Cli));

        let view = dashboard
            .overview(&DashboardQuery {
                search: "TAILWIND".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(view.posts.len(), 1);
        assert_eq!(view.empty_title, "記事が見つかりません");
    }

    #[tokio::test]
    async fn paginates_six_per_page_and_clamps() {
        let (dashboard, posts) = service();
        posts
            .create(CreatePostCommand {
                title: "Seventh post".to_string(),
                content: "Pushes the list onto a second page.".to_string(),
                author: "Human".to_string(),
            })
            .await
            .expect("create");

        let first = dashboard.overview(&DashboardQuery::default()).await;
        assert_eq!(first.posts.len(), 6);
        assert_eq!(first.pagination.current, 1);
        assert_eq!(first.pagination.total, 2);
        assert!(first.pagination.previous_href.is_none());
        assert_eq!(first.pagination.next_href.as_deref(), Some("/?page=2"));

        let clamped = dashboard
            .overview(&DashboardQuery {
                page: 99,
                ..Default::default()
            })
            .await;
        assert_eq!(clamped.pagination.current, 2);
        assert_eq!(clamped.posts.len(), 1);
    }

    #[test]
    fn page_links_keep_active_filters() {
        let query = DashboardQuery {
            search: "rust cli".to_string(),
            author: AuthorFilter::Only(AuthorKind::Ai),
            page: 1,
        };
        assert_eq!(page_href(&query, 3), "/?q=rust+cli&author=ai&page=3");
    }
}
