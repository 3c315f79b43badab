//! Issue comment types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment on an issue.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Remote identifier. Copies get a fresh one.
    pub id: u64,

    /// Comment text.
    pub body: String,

    /// Login of the comment author.
    pub author: String,

    /// Relationship of the author to the repository (e.g. `MEMBER`).
    pub author_association: String,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Last edit time, if any.
    pub updated_at: Option<DateTime<Utc>>,

    /// Reaction counts, when the remote reported them.
    pub reactions: Option<ReactionSummary>,
}

/// Reaction counts attached to a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReactionSummary {
    #[serde(default)]
    pub total_count: u64,
    #[serde(rename = "+1", default)]
    pub plus_one: u64,
    #[serde(rename = "-1", default)]
    pub minus_one: u64,
    #[serde(default)]
    pub laugh: u64,
    #[serde(default)]
    pub hooray: u64,
    #[serde(default)]
    pub confused: u64,
    #[serde(default)]
    pub heart: u64,
    #[serde(default)]
    pub rocket: u64,
    #[serde(default)]
    pub eyes: u64,
}

impl ReactionSummary {
    /// Renders the non-zero counts, e.g. `👍 2, 🎉 1`.
    ///
    /// Returns an empty string when there are no reactions.
    #[must_use]
    pub fn render(&self) -> String {
        [
            ("👍", self.plus_one),
            ("👎", self.minus_one),
            ("😄", self.laugh),
            ("🎉", self.hooray),
            ("😕", self.confused),
            ("❤️", self.heart),
            ("🚀", self.rocket),
            ("👀", self.eyes),
        ]
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(emoji, count)| format!("{emoji} {count}"))
        .collect::<Vec<_>>()
        .join(", ")
    }
}
