//! Orchestrates extraction and migration runs.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::{ExtractSettings, MigrateSettings};
use crate::extraction::{run_extraction, CsvSink};
use crate::migration::migrate_issues;
use crate::source::{api_base_url, GitHubSource};
use crate::summary::{RunMode, RunSummary};
use tracing::info;

/// Runs jobs against one GitHub host.
pub struct Runner {
    source: GitHubSource,
}

impl Runner {
    /// Builds an authenticated runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the host URL is invalid or the client
    /// cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let api_base = config.github_url().map(api_base_url).transpose()?;
        if let Some(base) = &api_base {
            info!(api = %base, "Using GitHub Enterprise API");
        }

        let source = GitHubSource::connect(
            config.token(),
            api_base.as_ref(),
            config.retry().clone(),
        )?;
        Ok(Self { source })
    }

    /// Returns the underlying issue source.
    pub fn source(&self) -> &GitHubSource {
        &self.source
    }

    /// Searches issues and writes one CSV row per issue.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the output file cannot be created, the
    /// first search page fails, or writing fails.
    pub async fn extract(&self, settings: &ExtractSettings) -> Result<RunSummary, RunnerError> {
        info!(output = %settings.output.display(), "Opening output file");
        let mut sink = CsvSink::create(&settings.output)?;

        let extraction = run_extraction(
            &self.source,
            &settings.query,
            &settings.plan,
            &settings.parser,
            &mut sink,
        )
        .await?;

        Ok(RunSummary::from(&extraction))
    }

    /// Copies the configured issues between repositories.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Migration`] at the first failed step, carrying
    /// a summary of the issues copied before it.
    pub async fn migrate(&self, settings: &MigrateSettings) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(RunMode::Migrate);
        let migrated = migrate_issues(
            &self.source,
            &settings.from,
            &settings.to,
            &settings.issues,
            &settings.notes,
        )
        .await?;

        for issue in migrated {
            summary.record_migration(issue);
        }
        Ok(summary)
    }
}
