//! Author classification by keyword.
//!
//! Authors are stored as free text. The kind is derived at read time from an
//! ordered rule table; the first rule with a matching keyword wins and
//! anything unmatched is treated as a human author. Matching is a plain
//! substring test on the lowercased name, so "Aiko" classifies as AI.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    Ai,
    Cli,
    Human,
}

/// Ordered keyword rules checked before falling back to [`AuthorKind::Human`].
pub const AUTHOR_RULES: [(AuthorKind, [&str; 2]); 2] = [
    (AuthorKind::Ai, ["ai", "claude"]),
    (AuthorKind::Cli, ["cli", "command"]),
];

impl AuthorKind {
    pub fn label(self) -> &'static str {
        match self {
            AuthorKind::Ai => "AI",
            AuthorKind::Cli => "CLI",
            AuthorKind::Human => "Human",
        }
    }

    /// Icon slot rendered next to the label.
    pub fn icon(self) -> &'static str {
        match self {
            AuthorKind::Ai => "bot",
            AuthorKind::Cli => "terminal",
            AuthorKind::Human => "user",
        }
    }

    /// Badge variant used by the stylesheet.
    pub fn variant(self) -> &'static str {
        match self {
            AuthorKind::Ai => "secondary",
            AuthorKind::Cli => "outline",
            AuthorKind::Human => "default",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthorKind::Ai => "ai",
            AuthorKind::Cli => "cli",
            AuthorKind::Human => "human",
        }
    }
}

impl fmt::Display for AuthorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display affordance derived from an author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBadge {
    pub kind: AuthorKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub variant: &'static str,
}

impl From<AuthorKind> for AuthorBadge {
    fn from(kind: AuthorKind) -> Self {
        Self {
            kind,
            label: kind.label(),
            icon: kind.icon(),
            variant: kind.variant(),
        }
    }
}

/// Classify an author name using [`AUTHOR_RULES`].
pub fn classify_author(name: &str) -> AuthorBadge {
    AuthorBadge::from(author_kind(name))
}

pub fn author_kind(name: &str) -> AuthorKind {
    let lowered = name.to_lowercase();
    AUTHOR_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(kind, _)| *kind)
        .unwrap_or(AuthorKind::Human)
}

/// Author filter accepted by the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorFilter {
    #[default]
    All,
    Only(AuthorKind),
}

impl AuthorFilter {
    pub fn matches(self, author: &str) -> bool {
        match self {
            AuthorFilter::All => true,
            AuthorFilter::Only(kind) => author_kind(author) == kind,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthorFilter::All => "all",
            AuthorFilter::Only(kind) => kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown author filter `{0}`")]
pub struct UnknownAuthorFilter(pub String);

impl FromStr for AuthorFilter {
    type Err = UnknownAuthorFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(AuthorFilter::All),
            "ai" => Ok(AuthorFilter::Only(AuthorKind::Ai)),
            "cli" => Ok(AuthorFilter::Only(AuthorKind::Cli)),
            "human" => Ok(AuthorFilter::Only(AuthorKind::Human)),
            _ => Err(UnknownAuthorFilter(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_documented_examples() {
        assert_eq!(classify_author("Claude-3 Writer").kind, AuthorKind::Ai);
        assert_eq!(classify_author("CLI Bot").kind, AuthorKind::Cli);
        assert_eq!(classify_author("Jane Smith").kind, AuthorKind::Human);
    }

    #[test]
    fn ai_rule_is_checked_before_cli_rule() {
        // "claude cli" contains keywords from both rules.
        assert_eq!(author_kind("claude cli"), AuthorKind::Ai);
        assert_eq!(author_kind("Command Line"), AuthorKind::Cli);
    }

    #[test]
    fn substring_matching_is_naive() {
        assert_eq!(author_kind("Aiko Tanaka"), AuthorKind::Ai);
        assert_eq!(author_kind("Clive"), AuthorKind::Cli);
    }

    #[test]
    fn badge_carries_display_affordance() {
        let badge = classify_author("AI");
        assert_eq!(badge.label, "AI");
        assert_eq!(badge.icon, "bot");
        assert_eq!(badge.variant, "secondary");

        let badge = classify_author("Someone");
        assert_eq!(badge.label, "Human");
        assert_eq!(badge.icon, "user");
        assert_eq!(badge.variant, "default");
    }

    #[test]
    fn parses_author_filters() {
        assert_eq!("".parse::<AuthorFilter>(), Ok(AuthorFilter::All));
        assert_eq!(
            "CLI".parse::<AuthorFilter>(),
            Ok(AuthorFilter::Only(AuthorKind::Cli))
        );
        assert!("robots".parse::<AuthorFilter>().is_err());
        assert!(AuthorFilter::Only(AuthorKind::Human).matches("Jane"));
        assert!(!AuthorFilter::Only(AuthorKind::Human).matches("AI"));
    }
}
