use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminDashboardQuery {
    pub(crate) q: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminPostForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) provider: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AdminGenerateForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) provider: Option<String>,
    pub(crate) post_id: Option<String>,
}
