use askama::Template;

use crate::domain::author::AuthorBadge;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminPostRowView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub badge: AuthorBadge,
    pub excerpt: String,
    pub reading_minutes: u32,
    pub display_date: String,
    pub preview_href: String,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Clone)]
pub struct AdminFieldErrorView {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct AdminPostFormView {
    pub heading: String,
    pub form_action: String,
    pub generate_action: String,
    pub submit_label: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub provider: String,
    pub errors: Vec<AdminFieldErrorView>,
    pub notice: Option<String>,
    pub post_id: Option<String>,
    pub cancel_href: String,
}

impl AdminPostFormView {
    pub fn error_for(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/post_form.html")]
pub struct AdminPostFormTemplate {
    pub view: AdminLayout<AdminPostFormView>,
}

#[derive(Clone)]
pub struct AdminPostDeleteView {
    pub title: String,
    pub action: String,
    pub cancel_href: String,
}

#[derive(Template)]
#[template(path = "admin/post_delete.html")]
pub struct AdminPostDeleteTemplate {
    pub view: AdminLayout<AdminPostDeleteView>,
}
