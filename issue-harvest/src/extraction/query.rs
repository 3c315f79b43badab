//! Search query construction.

use crate::source::RepoRef;

/// Qualifiers appended when none are configured.
pub const DEFAULT_QUALIFIERS: &str = "is:issue state:closed";

/// Builds an issue search query.
///
/// Format: `repo:{owner}/{name} {query} {qualifiers}`, skipping empty parts.
#[must_use]
pub fn build_search_query(repo: Option<&RepoRef>, query: &str, qualifiers: &str) -> String {
    let scope = repo.map(|r| format!("repo:{r}"));
    [scope.as_deref(), Some(query.trim()), Some(qualifiers.trim())]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_query() {
        let repo = RepoRef::new("mantle", "ops");
        let query = build_search_query(Some(&repo), "[Invoice Delivery]", DEFAULT_QUALIFIERS);
        assert_eq!(query, "repo:mantle/ops [Invoice Delivery] is:issue state:closed");
    }

    #[test]
    fn skips_empty_parts() {
        assert_eq!(
            build_search_query(None, "  [Carrier mapping Change] ", ""),
            "[Carrier mapping Change]"
        );
        assert_eq!(
            build_search_query(Some(&RepoRef::new("a", "b")), "", "is:issue"),
            "repo:a/b is:issue"
        );
    }
}
