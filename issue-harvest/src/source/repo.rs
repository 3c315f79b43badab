//! Repository references.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A repository given as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

/// The string was not in `owner/name` form.
#[derive(Debug, Error)]
#[error("Invalid repository '{value}', expected owner/name")]
pub struct InvalidRepoRef {
    pub value: String,
}

impl RepoRef {
    /// Creates a reference from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoRef {
    type Err = InvalidRepoRef;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRepoRef {
            value: value.to_string(),
        };
        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo: RepoRef = "mantle/ops".parse().unwrap();
        assert_eq!(repo, RepoRef::new("mantle", "ops"));
        assert_eq!(repo.to_string(), "mantle/ops");
    }

    #[test]
    fn rejects_malformed_refs() {
        for value in ["mantle", "/ops", "mantle/", "a/b/c", ""] {
            assert!(value.parse::<RepoRef>().is_err(), "accepted {value:?}");
        }
    }
}
