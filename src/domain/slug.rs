//! Title-to-slug conversion shared by every write path.
//!
//! The rule is intentionally small: lowercase, keep ASCII letters and digits,
//! and fold any run of whitespace, underscores, or hyphens into one hyphen.
//! Everything else is dropped without interrupting a separator run, so
//! `"a - ! - b"` and `"a - b"` both become `a-b`. Slugs are not checked for
//! uniqueness; two titles may share one.

/// Derive the URL slug for a post title.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        } else if is_separator(ch) {
            pending_separator = true;
        }
    }

    slug
}

fn is_separator(ch: char) -> bool {
    ch == '_' || ch == '-' || ch.is_whitespace()
}
