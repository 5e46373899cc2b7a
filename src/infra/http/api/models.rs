use serde::{Deserialize, Serialize};

/// Body of `POST /api/posts`. Every field is required; absence is reported by the handler.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PostCreateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PostUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
