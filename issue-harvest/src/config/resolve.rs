//! Merging command-line values with the config file.

use super::{validate_per_page, ConfigError, HarvestConfig};
use crate::extraction::{
    build_search_query, ExtractionPlan, PageBound, DEFAULT_PER_PAGE, DEFAULT_QUALIFIERS,
};
use crate::migration::MigrationNotes;
use crate::parser::{MarkerParser, Parser, PolicyKind};
use crate::source::RepoRef;
use std::path::PathBuf;

/// Output file used when none is configured.
pub const DEFAULT_OUTPUT: &str = "result.csv";

/// Source label for validation errors raised by command-line values.
const COMMAND_LINE: &str = "<command line>";

/// Extraction values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ExtractOverrides {
    pub repo: Option<String>,
    pub query: Option<String>,
    pub qualifiers: Option<String>,
    pub output: Option<PathBuf>,
    pub limit: Option<u64>,
    pub per_page: Option<u8>,
    pub exact_pages: bool,
    pub no_title: bool,
    pub policy: Option<PolicyKind>,
}

/// Everything an extraction run needs.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    /// Full search query, including repository scope and qualifiers.
    pub query: String,

    /// Output CSV path.
    pub output: PathBuf,

    /// Paging and row layout.
    pub plan: ExtractionPlan,

    /// Body parser.
    pub parser: Parser,
}

/// Migration values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct MigrateOverrides {
    pub from: String,
    pub to: String,
    pub team: Option<String>,
    pub issues: Vec<u64>,
}

/// Everything a migration run needs.
#[derive(Debug)]
pub struct MigrateSettings {
    pub from: RepoRef,
    pub to: RepoRef,
    pub issues: Vec<u64>,
    pub notes: MigrationNotes,
}

impl HarvestConfig {
    /// Resolves extraction settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the repository is malformed, the page size
    /// is out of range, or neither a query nor a repository is given.
    pub fn resolve_extract(
        &self,
        overrides: ExtractOverrides,
    ) -> Result<ExtractSettings, ConfigError> {
        let repo = overrides
            .repo
            .or_else(|| self.repo.clone())
            .map(|r| r.parse::<RepoRef>())
            .transpose()?;
        let text = overrides
            .query
            .or_else(|| self.query.clone())
            .unwrap_or_default();

        if repo.is_none() && text.trim().is_empty() {
            return Err(command_line_error("a search query or repository is required"));
        }

        let qualifiers = overrides
            .qualifiers
            .or_else(|| self.qualifiers.clone())
            .unwrap_or_else(|| DEFAULT_QUALIFIERS.to_string());

        let per_page = overrides
            .per_page
            .or(self.per_page)
            .unwrap_or(DEFAULT_PER_PAGE);
        validate_per_page(per_page).map_err(command_line_error)?;

        let exact = overrides.exact_pages || self.exact_pages.unwrap_or(false);
        let plan = ExtractionPlan {
            target_total: overrides.limit.or(self.limit),
            per_page,
            bound: if exact {
                PageBound::Exact
            } else {
                PageBound::Historical
            },
            include_title: !overrides.no_title && self.include_title.unwrap_or(true),
        };

        let policy = overrides.policy.or(self.policy).unwrap_or_default();
        let parser = self.parser_for(policy)?;

        Ok(ExtractSettings {
            query: build_search_query(repo.as_ref(), &text, &qualifiers),
            output: overrides
                .output
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            plan,
            parser,
        })
    }

    /// Resolves migration settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a repository is malformed, no team or no
    /// issue numbers are given, or a configured template does not compile.
    pub fn resolve_migrate(
        &self,
        overrides: MigrateOverrides,
    ) -> Result<MigrateSettings, ConfigError> {
        let from = overrides.from.parse::<RepoRef>()?;
        let to = overrides.to.parse::<RepoRef>()?;

        if overrides.issues.is_empty() {
            return Err(command_line_error("at least one issue number is required"));
        }

        let team = overrides
            .team
            .or_else(|| self.migration.team.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| command_line_error("a migration team is required"))?;

        let mut notes = MigrationNotes::new(team);
        if let Some(template) = &self.migration.provenance_template {
            notes = notes
                .with_provenance_template(template)
                .map_err(|e| command_line_error(e.to_string()))?;
        }
        if let Some(template) = &self.migration.comment_template {
            notes = notes
                .with_comment_template(template)
                .map_err(|e| command_line_error(e.to_string()))?;
        }

        Ok(MigrateSettings {
            from,
            to,
            issues: overrides.issues,
            notes,
        })
    }

    fn parser_for(&self, policy: PolicyKind) -> Result<Parser, ConfigError> {
        Ok(match policy {
            PolicyKind::Merchant => Parser::Merchant,
            PolicyKind::Message => Parser::Message,
            PolicyKind::Markers => {
                if self.markers.is_empty() {
                    return Err(command_line_error(
                        "policy 'markers' requires markers in the config file",
                    ));
                }
                Parser::Markers(MarkerParser::new(
                    &self.markers,
                    self.include_email.unwrap_or(true),
                ))
            }
        })
    }
}

fn command_line_error(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        path: COMMAND_LINE.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_query_from_repo_and_text() {
        let settings = HarvestConfig::default()
            .resolve_extract(ExtractOverrides {
                repo: Some("mantle/ops".to_string()),
                query: Some("[Invoice Delivery]".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(
            settings.query,
            "repo:mantle/ops [Invoice Delivery] is:issue state:closed"
        );
        assert_eq!(settings.output, PathBuf::from("result.csv"));
        assert_eq!(settings.plan.per_page, 100);
        assert_eq!(settings.plan.bound, PageBound::Historical);
        assert!(settings.plan.include_title);
        assert!(matches!(settings.parser, Parser::Merchant));
    }

    #[test]
    fn command_line_overrides_file() {
        let config = HarvestConfig {
            query: Some("from file".to_string()),
            per_page: Some(30),
            limit: Some(150),
            policy: Some(PolicyKind::Message),
            ..Default::default()
        };

        let settings = config
            .resolve_extract(ExtractOverrides {
                query: Some("from cli".to_string()),
                per_page: Some(50),
                exact_pages: true,
                no_title: true,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.query, "from cli is:issue state:closed");
        assert_eq!(settings.plan.per_page, 50);
        assert_eq!(settings.plan.target_total, Some(150));
        assert_eq!(settings.plan.bound, PageBound::Exact);
        assert!(!settings.plan.include_title);
        assert!(matches!(settings.parser, Parser::Message));
    }

    #[test]
    fn requires_query_or_repo() {
        let result = HarvestConfig::default().resolve_extract(ExtractOverrides::default());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn markers_policy_uses_file_markers() {
        let config = HarvestConfig {
            query: Some("q".to_string()),
            markers: vec!["Carrier:".to_string()],
            include_email: Some(false),
            ..Default::default()
        };
        let settings = config
            .resolve_extract(ExtractOverrides {
                policy: Some(PolicyKind::Markers),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.parser.parse("Carrier: UPS\nx@y.io"), vec!["UPS"]);
    }

    #[test]
    fn migration_needs_team_and_issues() {
        let overrides = MigrateOverrides {
            from: "mantle/ops".to_string(),
            to: "mantle/data-quality".to_string(),
            team: None,
            issues: vec![794],
        };
        assert!(HarvestConfig::default()
            .resolve_migrate(overrides.clone())
            .is_err());

        let mut config = HarvestConfig::default();
        config.migration.team = Some("Team Mantle".to_string());
        let settings = config.resolve_migrate(overrides.clone()).unwrap();
        assert_eq!(settings.notes.team(), "Team Mantle");
        assert_eq!(settings.to, RepoRef::new("mantle", "data-quality"));

        let no_issues = MigrateOverrides {
            issues: Vec::new(),
            ..overrides
        };
        assert!(config.resolve_migrate(no_issues).is_err());
    }
}
