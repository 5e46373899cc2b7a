//! Heading extraction for the table of contents.
//!
//! Only `## ` and `### ` prefixes are recognised. Identifiers come from the
//! zero-based line index (`heading-{index}`), so inserting or removing a line
//! above a heading changes its anchor. Both the heading list and the rewritten
//! body are produced by [`outline`] in one pass, which keeps the table of
//! contents and the in-body anchors in agreement.

use serde::Serialize;

const LEVEL_TWO_PREFIX: &str = "## ";
const LEVEL_THREE_PREFIX: &str = "### ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub headings: Vec<Heading>,
    pub rendered: String,
}

/// Walk `content` line by line, collecting headings and rewriting them as anchored markup.
pub fn outline(content: &str) -> Outline {
    let mut headings = Vec::new();
    let mut lines = Vec::new();

    for (index, line) in content.split('\n').enumerate() {
        match parse_heading(index, line) {
            Some(heading) => {
                lines.push(anchor_markup(&heading));
                headings.push(heading);
            }
            None => lines.push(line.to_string()),
        }
    }

    Outline {
        headings,
        rendered: lines.join("\n"),
    }
}

pub fn extract_headings(content: &str) -> Vec<Heading> {
    outline(content).headings
}

pub fn render_with_anchors(content: &str) -> String {
    outline(content).rendered
}

fn parse_heading(index: usize, line: &str) -> Option<Heading> {
    let trimmed = line.trim();
    let (level, text) = if let Some(text) = trimmed.strip_prefix(LEVEL_TWO_PREFIX) {
        (2, text)
    } else if let Some(text) = trimmed.strip_prefix(LEVEL_THREE_PREFIX) {
        (3, text)
    } else {
        return None;
    };

    Some(Heading {
        id: format!("heading-{index}"),
        text: text.to_string(),
        level,
    })
}

fn anchor_markup(heading: &Heading) -> String {
    format!(
        "<h{level} id=\"{id}\">{text}</h{level}>",
        level = heading.level,
        id = heading.id,
        text = heading.text
    )
}
