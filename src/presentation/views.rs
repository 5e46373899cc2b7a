use std::collections::HashSet;

use crate::application::error::{ErrorReport, HttpError};
use crate::domain::author::{AuthorBadge, classify_author};
use crate::domain::entities::PostRecord;
use crate::domain::headings::{Heading, outline};
use crate::domain::posts::{CARD_EXCERPT_CHARS, HUMAN_DATE_FORMAT, ISO_DATE_FORMAT, excerpt};
use crate::domain::reading::estimate_minutes;
use ammonia::Builder as AmmoniaBuilder;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::OffsetDateTime;
use url::form_urlencoded;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
    pub target: Option<String>,
    pub rel: Option<String>,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn with_canonical(self, canonical: String) -> Self {
        Self {
            meta: self.meta.with_canonical(canonical),
            ..self
        }
    }

    /// Override the page title, keeping the site name as a suffix.
    pub fn with_page_title(self, page_title: &str) -> Self {
        let title = format!("{page_title} | {}", self.brand.title);
        Self {
            meta: PageMetaView {
                og_title: title.clone(),
                title,
                ..self.meta
            },
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub canonical: String,
}

impl PageMetaView {
    pub fn with_canonical(self, canonical: String) -> Self {
        Self { canonical, ..self }
    }
}

fn format_date(value: OffsetDateTime) -> (String, String) {
    let published = value.format(HUMAN_DATE_FORMAT).unwrap_or_default();
    let iso_date = value.format(ISO_DATE_FORMAT).unwrap_or_default();
    (published, iso_date)
}

#[derive(Clone)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub badge: AuthorBadge,
    pub reading_minutes: u32,
    pub iso_date: String,
    pub published: String,
}

impl PostCard {
    pub fn from_record(post: &PostRecord) -> Self {
        let (published, iso_date) = format_date(post.created_at);
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: excerpt(&post.content, CARD_EXCERPT_CHARS),
            author: post.author.clone(),
            badge: classify_author(&post.author),
            reading_minutes: estimate_minutes(&post.content),
            iso_date,
            published,
        }
    }
}

pub fn post_cards(posts: &[PostRecord]) -> Vec<PostCard> {
    posts.iter().map(PostCard::from_record).collect()
}

pub struct HomeView {
    pub posts: Vec<PostCard>,
}

impl HomeView {
    pub fn has_posts(&self) -> bool {
        !self.posts.is_empty()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeView>,
}

pub struct PostsIndexView {
    pub posts: Vec<PostCard>,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "posts.html")]
pub struct PostsTemplate {
    pub view: LayoutContext<PostsIndexView>,
}

#[derive(Clone)]
pub struct TocEntryView {
    pub anchor: String,
    pub text: String,
    pub level: u8,
}

impl From<Heading> for TocEntryView {
    fn from(heading: Heading) -> Self {
        Self {
            anchor: heading.id,
            text: heading.text,
            level: heading.level,
        }
    }
}

pub struct ShareLinksView {
    pub twitter: String,
    pub facebook: String,
    pub url: String,
}

impl ShareLinksView {
    pub fn new(title: &str, url: &str) -> Self {
        let twitter_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("text", title)
            .append_pair("url", url)
            .finish();
        let facebook_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("u", url)
            .finish();

        Self {
            twitter: format!("https://twitter.com/intent/tweet?{twitter_query}"),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?{facebook_query}"),
            url: url.to_string(),
        }
    }
}

pub struct PostDetailContext {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub badge: AuthorBadge,
    pub reading_minutes: u32,
    pub published: String,
    pub iso_date: String,
    pub toc: Vec<TocEntryView>,
    pub body_html: String,
    pub share: ShareLinksView,
    pub related: Vec<PostCard>,
}

impl PostDetailContext {
    pub fn build(post: &PostRecord, related: &[PostRecord], canonical: &str) -> Self {
        let outline = outline(&post.content);
        let (published, iso_date) = format_date(post.created_at);

        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            author: post.author.clone(),
            badge: classify_author(&post.author),
            reading_minutes: estimate_minutes(&post.content),
            published,
            iso_date,
            toc: outline.headings.into_iter().map(TocEntryView::from).collect(),
            body_html: sanitize_body(&outline.rendered),
            share: ShareLinksView::new(&post.title, canonical),
            related: post_cards(related),
        }
    }

    pub fn has_toc(&self) -> bool {
        !self.toc.is_empty()
    }

    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }
}

/// Strip everything but the anchored heading markup from a rendered body.
pub fn sanitize_body(rendered: &str) -> String {
    let tags: HashSet<&'static str> = HashSet::from(["h2", "h3"]);
    let mut builder = AmmoniaBuilder::default();
    builder
        .tags(tags)
        .add_tag_attributes("h2", &["id"])
        .add_tag_attributes("h3", &["id"]);
    builder.clean(rendered).to_string()
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

pub struct SearchView {
    pub query: String,
    pub posts: Vec<PostCard>,
}

impl SearchView {
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn count(&self) -> usize {
        self.posts.len()
    }
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub view: LayoutContext<SearchView>,
}

pub struct AboutView;

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the homepage to continue reading.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
