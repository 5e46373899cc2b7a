use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use tracing::debug;

use crate::application::admin::DashboardQuery;
use crate::domain::author::AuthorFilter;
use crate::presentation::{admin::views as admin_views, views::render_template_response};

use super::AdminState;
use super::forms::AdminDashboardQuery;

pub(super) async fn admin_dashboard(
    State(state): State<AdminState>,
    Query(query): Query<AdminDashboardQuery>,
) -> Response {
    let chrome = state.chrome.load("/");
    let content = state.dashboard.overview(&dashboard_query(query)).await;

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminDashboardTemplate { view }, StatusCode::OK)
}

/// Unknown filters and unparsable pages fall back to the unfiltered first page.
fn dashboard_query(query: AdminDashboardQuery) -> DashboardQuery {
    let author = match query.author.as_deref().map(str::parse::<AuthorFilter>) {
        Some(Ok(filter)) => filter,
        Some(Err(err)) => {
            debug!(target: "postline::http::admin", error = %err, "ignoring author filter");
            AuthorFilter::All
        }
        None => AuthorFilter::All,
    };

    let page = query
        .page
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(1);

    DashboardQuery {
        search: query.q.unwrap_or_default(),
        author,
        page,
    }
}
