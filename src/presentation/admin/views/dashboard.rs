use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminMetricView {
    pub label: String,
    pub icon: &'static str,
    pub value: u64,
    pub hint: Option<String>,
}

#[derive(Clone)]
pub struct AdminDashboardPanelView {
    pub title: String,
    pub caption: String,
    pub metrics: Vec<AdminMetricView>,
    pub empty_message: String,
}

impl AdminDashboardPanelView {
    pub fn has_metrics(&self) -> bool {
        !self.metrics.is_empty()
    }
}

#[derive(Clone)]
pub struct AdminFilterOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminPageLinkView {
    pub number: usize,
    pub href: String,
    pub is_current: bool,
}

#[derive(Clone)]
pub struct AdminPaginationView {
    pub current: usize,
    pub total: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub pages: Vec<AdminPageLinkView>,
}

impl AdminPaginationView {
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }
}

#[derive(Clone)]
pub struct AdminDashboardView {
    pub title: String,
    pub panels: Vec<AdminDashboardPanelView>,
    pub search: String,
    pub filters: Vec<AdminFilterOptionView>,
    pub posts: Vec<super::AdminPostRowView>,
    pub pagination: AdminPaginationView,
    pub empty_title: String,
    pub empty_message: String,
    pub new_post_href: String,
}

impl AdminDashboardView {
    pub fn has_panels(&self) -> bool {
        !self.panels.is_empty()
    }

    pub fn has_posts(&self) -> bool {
        !self.posts.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub view: AdminLayout<AdminDashboardView>,
}
