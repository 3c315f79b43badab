//! CLI for issue-harvest.
//!
//! Extracts fields from GitHub issue bodies into a CSV file, or copies
//! issues with their comments from one repository to another.

use clap::{Parser, Subcommand};
use issue_harvest::{
    ExtractOverrides, HarvestConfig, MigrateOverrides, PolicyKind, RunMode, RunSummary, Runner,
    RunnerConfig, RunnerError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Harvest - Extract issue fields to CSV and migrate issues between repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token.
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// GitHub Enterprise URL (e.g. https://github.example.com). Defaults to github.com.
    #[arg(long, env = "GITHUB_URL")]
    github_url: Option<String>,

    /// Path to a harvest.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search issues and write the parsed fields to a CSV file.
    Extract {
        /// Repository to search, as owner/name.
        #[arg(long, env = "REPO")]
        repo: Option<String>,

        /// Free-text search query.
        #[arg(long, env = "QUERY")]
        query: Option<String>,

        /// Search qualifiers [default: "is:issue state:closed"].
        #[arg(long)]
        qualifiers: Option<String>,

        /// Output CSV path [default: result.csv].
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of results to page through. Defaults to the search total.
        #[arg(long)]
        limit: Option<u64>,

        /// Issues per search page (1-100) [default: 100].
        #[arg(long)]
        per_page: Option<u8>,

        /// Stop at the last page that holds results instead of one past it.
        #[arg(long)]
        exact_pages: bool,

        /// Parser policy: merchant, message or markers.
        #[arg(long)]
        policy: Option<PolicyKind>,

        /// Leave the issue title out of each row.
        #[arg(long)]
        no_title: bool,
    },

    /// Copy issues and their comments to another repository.
    Migrate {
        /// Source repository, as owner/name.
        #[arg(long)]
        from: String,

        /// Target repository, as owner/name.
        #[arg(long)]
        to: String,

        /// Team named as the new owner in the provenance comment.
        #[arg(long)]
        team: Option<String>,

        /// Issue numbers to migrate.
        #[arg(long = "issue", required = true, num_args = 1..)]
        issues: Vec<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            if let Some(summary) = e.partial_summary() {
                print_summary(summary);
            }
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = match &args.config {
        Some(path) => HarvestConfig::load(path)?,
        None => HarvestConfig::default(),
    };

    let runner = Runner::new(RunnerConfig::new(args.token, args.github_url))?;

    match args.command {
        Command::Extract {
            repo,
            query,
            qualifiers,
            output,
            limit,
            per_page,
            exact_pages,
            policy,
            no_title,
        } => {
            let settings = config.resolve_extract(ExtractOverrides {
                repo,
                query,
                qualifiers,
                output,
                limit,
                per_page,
                exact_pages,
                no_title,
                policy,
            })?;
            runner.extract(&settings).await
        }
        Command::Migrate {
            from,
            to,
            team,
            issues,
        } => {
            let settings = config.resolve_migrate(MigrateOverrides {
                from,
                to,
                team,
                issues,
            })?;
            runner.migrate(&settings).await
        }
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    match summary.mode {
        RunMode::Extract => {
            println!("  Mode: Extract");
            println!("  Matching issues: {}", summary.total_matches);
            println!("  Pages requested: {}", summary.pages_requested);
            println!("  Pages skipped: {}", summary.pages_skipped);
            println!("  Rows written: {}", summary.rows_written);
        }
        RunMode::Migrate => {
            println!("  Mode: Migrate");
            println!("  Issues migrated: {}", summary.migrated.len());
            println!("  Comments copied: {}", summary.comments_copied);
            for issue in &summary.migrated {
                println!("    {} -> {}", issue.source_url, issue.target_url);
            }
        }
    }
}
