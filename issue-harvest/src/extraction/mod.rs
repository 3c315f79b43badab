//! Search-to-CSV extraction pipeline.
//!
//! Pages through an issue search, runs a [`Parser`] over every issue body
//! and appends one CSV row per issue.
//!
//! Failure policy: the first page is mandatory, later pages are best effort.
//! A page that fails after the first is logged and skipped, which yields
//! fewer rows rather than a failed run.

mod error;
mod plan;
mod query;
mod row;
mod sink;

pub use error::{ExtractionError, SinkError};
pub use plan::{
    max_searchable_page, ExtractionPlan, PageBound, DEFAULT_PER_PAGE, MAX_SEARCH_RESULTS,
};
pub use query::{build_search_query, DEFAULT_QUALIFIERS};
pub use row::build_row;
pub use sink::CsvSink;

use crate::parser::Parser;
use crate::source::{IssueSource, SearchPage};
use std::io::Write;
use tracing::{debug, info, info_span, warn, Instrument};

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Total matches reported by the remote with the first page.
    pub total_count: u64,

    /// Pages requested, including failed ones.
    pub pages_requested: u32,

    /// Pages that failed and were skipped.
    pub pages_failed: u32,

    /// Rows written to the sink.
    pub rows_written: usize,
}

/// Runs the extraction for `query` into `sink`.
///
/// The sink is flushed once before returning, on success and on failure.
///
/// # Errors
///
/// Returns [`ExtractionError::FirstPage`] if page 1 cannot be fetched, or
/// [`ExtractionError::Sink`] if writing fails.
pub async fn run_extraction<S, W>(
    source: &S,
    query: &str,
    plan: &ExtractionPlan,
    parser: &Parser,
    sink: &mut CsvSink<W>,
) -> Result<ExtractionSummary, ExtractionError>
where
    S: IssueSource,
    W: Write,
{
    let span = info_span!("extract", query = %query, per_page = plan.per_page);

    async {
        let result = drive_pages(source, query, plan, parser, sink).await;
        let flushed = sink.flush();

        let summary = result?;
        flushed?;

        info!(
            rows = summary.rows_written,
            pages = summary.pages_requested,
            failed_pages = summary.pages_failed,
            "Extraction complete"
        );
        Ok(summary)
    }
    .instrument(span)
    .await
}

async fn drive_pages<S, W>(
    source: &S,
    query: &str,
    plan: &ExtractionPlan,
    parser: &Parser,
    sink: &mut CsvSink<W>,
) -> Result<ExtractionSummary, ExtractionError>
where
    S: IssueSource,
    W: Write,
{
    let mut summary = ExtractionSummary::default();

    info!("Fetching first page");
    summary.pages_requested += 1;
    let first = source
        .search_issues(query, 1, plan.per_page)
        .await
        .map_err(ExtractionError::FirstPage)?;
    summary.total_count = first.total_count;

    let target = plan.target_total.unwrap_or(first.total_count);
    let last_page = last_page_for(plan, target);
    info!(
        total_count = first.total_count,
        target, last_page, "Planned search pages"
    );

    write_page(&first, parser, plan.include_title, sink, &mut summary)?;

    for page in 2..=last_page {
        summary.pages_requested += 1;
        match source.search_issues(query, page, plan.per_page).await {
            Ok(results) => write_page(&results, parser, plan.include_title, sink, &mut summary)?,
            Err(e) => {
                warn!(page, error = %e, "Failed to fetch search page, skipping");
                summary.pages_failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Applies the plan's bound and clamps it to what the search API serves.
fn last_page_for(plan: &ExtractionPlan, target: u64) -> u32 {
    let planned = plan.bound.last_page(target, plan.per_page);
    let cap = max_searchable_page(plan.per_page);
    if planned > cap {
        warn!(
            planned,
            cap,
            max_results = MAX_SEARCH_RESULTS,
            "Search results are capped, not requesting further pages"
        );
        return cap;
    }
    planned
}

fn write_page<W: Write>(
    page: &SearchPage,
    parser: &Parser,
    include_title: bool,
    sink: &mut CsvSink<W>,
    summary: &mut ExtractionSummary,
) -> Result<(), SinkError> {
    debug!(page = page.page, issues = page.issues.len(), "Writing page");
    for issue in &page.issues {
        let fields = parser.parse(&issue.body);
        sink.write_row(&build_row(fields, issue, include_title))?;
        summary.rows_written += 1;
    }
    Ok(())
}
