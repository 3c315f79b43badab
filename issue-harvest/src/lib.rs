#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod extraction;
pub mod migration;
pub mod parser;
pub mod rate_limit;
pub mod runner;
pub mod source;
pub mod summary;
pub mod templates;

pub use config::{ConfigError, ExtractOverrides, HarvestConfig, MigrateOverrides};
pub use extraction::{
    run_extraction, CsvSink, ExtractionError, ExtractionPlan, ExtractionSummary, PageBound,
    SinkError,
};
pub use migration::{
    migrate_issue, migrate_issues, BatchError, MigratedIssue, MigrationError, MigrationNotes,
};
pub use parser::{Parser, PolicyKind};
pub use rate_limit::{with_backoff, RateLimitInfo, RetryPolicy};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use source::{GitHubSource, Issue, IssueSource, RepoRef, SourceError};
pub use summary::{RunMode, RunSummary};
pub use templates::{TemplateError, TemplateRenderer};
