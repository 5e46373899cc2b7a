#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use postline::application::posts::PostServiceError;
use postline::domain::entities::PostRecord;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(
        "no publishing target configured (use --database-url / POSTLINE_DATABASE_URL or --site / POSTLINE_SITE_URL)"
    )]
    MissingCredentials,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(String),
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(String),
}

impl From<PostServiceError> for CliError {
    fn from(err: PostServiceError) -> Self {
        match err {
            PostServiceError::Validation(errors) => CliError::Validation(
                errors
                    .iter()
                    .map(|error| format!("{}: {}", error.field.as_str(), error.message))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            other => CliError::Database(other.to_string()),
        }
    }
}

pub fn read_content(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Serialize)]
struct CreatePostBody<'a> {
    title: &'a str,
    content: &'a str,
    author: &'a str,
}

#[derive(Clone, Debug)]
pub struct SiteClient {
    client: Client,
    base: Url,
}

impl SiteClient {
    pub fn new(site: &str) -> Result<Self, CliError> {
        let base = Url::parse(site)?.join("/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postline-publish/", env!("CARGO_PKG_VERSION"))
    }

    pub async fn create_post(
        &self,
        title: &str,
        author: &str,
        content: &str,
    ) -> Result<PostRecord, CliError> {
        let url = self.base.join("api/posts")?;
        let resp = self
            .client
            .post(url)
            .json(&CreatePostBody {
                title,
                content,
                author,
            })
            .send()
            .await?;
        Self::handle(resp).await
    }

    async fn handle<T: for<'de> Deserialize<'de>>(resp: Response) -> Result<T, CliError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(CliError::Server(format!("status {status} body {text}")));
        }
        let val = serde_json::from_slice(&bytes)
            .map_err(|e| CliError::Server(format!("failed to parse body: {e}")))?;
        Ok(val)
    }
}
