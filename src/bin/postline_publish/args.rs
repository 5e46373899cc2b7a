//! Command-line surface for `postline-publish`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "postline-publish",
    version,
    about = "Publish a post from a file, bypassing the web UI",
    long_about = None
)]
pub struct Cli {
    /// Post title
    pub title: String,

    /// Author name shown on the post
    pub author: String,

    /// Path to a file holding the post body
    pub content_file: PathBuf,

    /// Insert straight into Postgres (takes precedence over --site)
    #[arg(long, env = "POSTLINE_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Running postline site to publish through, e.g. <https://example.com>
    #[arg(long, env = "POSTLINE_SITE_URL")]
    pub site: Option<String>,
}
