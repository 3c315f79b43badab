//! Configuration loading and resolution.
//!
//! An optional TOML file supplies defaults; command-line values override
//! it; built-in defaults fill whatever is left. Resolution produces ready
//! to run settings or a [`ConfigError`].

mod error;
mod resolve;

pub use error::ConfigError;
pub use resolve::{
    ExtractOverrides, ExtractSettings, MigrateOverrides, MigrateSettings, DEFAULT_OUTPUT,
};

use crate::parser::PolicyKind;
use crate::source::RepoRef;
use crate::templates::validate_template;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Contents of a `harvest.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HarvestConfig {
    /// Free-text search query.
    pub query: Option<String>,

    /// Repository (`owner/name`) to scope the search to.
    pub repo: Option<String>,

    /// Search qualifiers (defaults to `is:issue state:closed`).
    pub qualifiers: Option<String>,

    /// Issues per search page (1..=100).
    pub per_page: Option<u8>,

    /// Number of results to page through.
    pub limit: Option<u64>,

    /// Whether to use the exact page bound.
    pub exact_pages: Option<bool>,

    /// Whether the issue title is written after the parsed fields.
    pub include_title: Option<bool>,

    /// Output CSV path.
    pub output: Option<PathBuf>,

    /// Parser policy.
    pub policy: Option<PolicyKind>,

    /// Markers for the `markers` policy, in column order.
    #[serde(default)]
    pub markers: Vec<String>,

    /// Whether the `markers` policy appends the first email.
    pub include_email: Option<bool>,

    /// Migration settings.
    #[serde(default)]
    pub migration: MigrationSection,
}

/// The `[migration]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MigrationSection {
    /// Team named as the new owner in the provenance comment.
    pub team: Option<String>,

    /// Handlebars template for the provenance comment.
    pub provenance_template: Option<String>,

    /// Handlebars template for each copied comment.
    pub comment_template: Option<String>,
}

impl HarvestConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading config");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        debug!(?config, "Loaded config");
        Ok(config)
    }

    /// Validates value ranges and cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first problem found.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if let Some(per_page) = self.per_page {
            validate_per_page(per_page).map_err(fail)?;
        }

        if self.policy == Some(PolicyKind::Markers) && self.markers.is_empty() {
            return Err(fail("policy 'markers' requires a non-empty markers list".to_string()));
        }

        if self.markers.iter().any(|m| m.trim().is_empty()) {
            return Err(fail("markers must not be empty strings".to_string()));
        }

        if let Some(repo) = &self.repo {
            repo.parse::<RepoRef>()?;
        }

        for (name, template) in [
            ("provenance-template", &self.migration.provenance_template),
            ("comment-template", &self.migration.comment_template),
        ] {
            if let Some(template) = template {
                validate_template(template).map_err(|e| fail(format!("{name}: {e}")))?;
            }
        }

        Ok(())
    }
}

/// Checks that a page size is one the search API accepts.
pub(crate) fn validate_per_page(per_page: u8) -> Result<(), String> {
    if per_page == 0 || per_page > 100 {
        return Err(format!("per-page must be between 1 and 100, got {per_page}"));
    }
    Ok(())
}
