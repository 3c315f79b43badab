//! Compiled field patterns shared by the built-in policies.

use regex::Regex;
use std::sync::LazyLock;

/// First email-looking token in a body.
pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").expect("email pattern is valid")
});

pub(crate) static USER_NAME: LazyLock<FieldPattern> =
    LazyLock::new(|| FieldPattern::literal("User Name:"));

pub(crate) static ID: LazyLock<FieldPattern> = LazyLock::new(|| FieldPattern::literal("ID:"));

pub(crate) static MESSAGE: LazyLock<FieldPattern> =
    LazyLock::new(|| FieldPattern::literal("Message:"));

/// Captures the rest of the line following a literal marker.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    marker: String,
    regex: Regex,
}

impl FieldPattern {
    /// Builds a pattern for `marker`, matched literally and case-sensitively.
    ///
    /// Escaping makes every marker a valid pattern, so this never fails.
    #[must_use]
    pub fn literal(marker: &str) -> Self {
        let regex = Regex::new(&format!("{}(.*)", regex::escape(marker)))
            .expect("escaped marker is a valid pattern");
        Self {
            marker: marker.to_string(),
            regex,
        }
    }

    /// The marker this pattern looks for.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns the trimmed text after the first occurrence of the marker,
    /// or an empty string when the marker is absent.
    ///
    /// Later repeats of the marker on the same line are removed as well.
    #[must_use]
    pub fn extract(&self, text: &str) -> String {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace(&self.marker, "").trim().to_string())
            .unwrap_or_default()
    }
}

/// Returns the first email address in `text`, or an empty string.
#[must_use]
pub fn first_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
