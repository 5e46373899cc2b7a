#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

fn content_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write content");
    file
}

fn publish_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postline-publish"));
    cmd.env_remove("POSTLINE_DATABASE_URL")
        .env_remove("POSTLINE_SITE_URL");
    cmd
}

#[test]
fn publishes_through_site_api() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/api/posts")
            .json_body_includes(r#"{"title":"Release notes","author":"CLI Bot"}"#);
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":"00000000-0000-0000-0000-0000000000aa","title":"Release notes","slug":"release-notes","content":"Version 2 is out today.","author":"CLI Bot","created_at":"2025-03-01T10:00:00Z","updated_at":"2025-03-01T10:00:00Z"}"#);
    });

    let file = content_file("Version 2 is out today.");
    let assert = publish_cmd()
        .env("POSTLINE_SITE_URL", server.base_url())
        .arg("Release notes")
        .arg("CLI Bot")
        .arg(file.path())
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Post created (ID: 00000000-0000-0000-0000-0000000000aa)"));
    assert!(output.contains("URL: /posts/release-notes"));
    mock.assert();
}

#[test]
fn missing_target_fails_fast() {
    let file = content_file("Some body text for the post.");
    publish_cmd()
        .arg("Release notes")
        .arg("CLI Bot")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("no publishing target configured"));
}

#[test]
fn unreadable_content_file_is_reported() {
    publish_cmd()
        .env("POSTLINE_SITE_URL", "http://127.0.0.1:9")
        .arg("Release notes")
        .arg("CLI Bot")
        .arg("/no/such/post.md")
        .assert()
        .failure()
        .stderr(contains("/no/such/post.md"));
}

#[test]
fn missing_arguments_print_usage() {
    publish_cmd()
        .arg("Only a title")
        .assert()
        .failure()
        .stderr(contains("Usage"));
}
