use postline::domain::headings::{extract_headings, render_with_anchors};
use postline::domain::reading::estimate_minutes;

const ARTICLE: &str = "Intro line\n## Getting started\nSome text\n### Install the toolchain\nmore text";

#[test]
fn anchored_body_snapshot() {
    insta::assert_snapshot!(render_with_anchors(ARTICLE), @r#"
    Intro line
    <h2 id="heading-1">Getting started</h2>
    Some text
    <h3 id="heading-3">Install the toolchain</h3>
    more text
    "#);
}

#[test]
fn toc_anchors_match_body_anchors() {
    let rendered = render_with_anchors(ARTICLE);
    for heading in extract_headings(ARTICLE) {
        assert!(
            rendered.contains(&format!("id=\"{}\"", heading.id)),
            "missing anchor {}",
            heading.id
        );
    }
}

#[test]
fn reading_time_is_zero_for_empty_body() {
    assert_eq!(estimate_minutes(""), 0);
    assert!(estimate_minutes(&"語".repeat(1200)) >= 1);
}
