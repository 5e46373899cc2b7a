//! postline-publish: emergency publishing outside the web UI.

#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use postline::application::posts::{CreatePostCommand, PostService};
use postline::domain::entities::PostRecord;
use postline::infra::db::PostgresRepositories;

use args::Cli;
use client::{CliError, SiteClient, read_content};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match publish(cli).await {
        Ok(post) => {
            println!("Post created (ID: {})", post.id);
            println!("URL: /posts/{}", post.slug);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn publish(cli: Cli) -> Result<PostRecord, CliError> {
    let content = read_content(&cli.content_file)?;

    if let Some(url) = non_blank(cli.database_url.as_deref()) {
        return publish_to_database(url, cli.title, cli.author, content).await;
    }

    if let Some(site) = non_blank(cli.site.as_deref()) {
        let client = SiteClient::new(site)?;
        return client.create_post(&cli.title, &cli.author, &content).await;
    }

    Err(CliError::MissingCredentials)
}

async fn publish_to_database(
    url: &str,
    title: String,
    author: String,
    content: String,
) -> Result<PostRecord, CliError> {
    let pool = PostgresRepositories::connect(url, 1)
        .await
        .map_err(|err| CliError::Database(err.to_string()))?;

    let service = PostService::new(Arc::new(PostgresRepositories::new(pool)));
    let post = service
        .create(CreatePostCommand {
            title,
            content,
            author,
        })
        .await?;
    Ok(post)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
