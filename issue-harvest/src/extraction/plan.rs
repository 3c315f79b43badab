//! Page planning for search extraction.

/// Maximum results the search API will page through.
pub const MAX_SEARCH_RESULTS: u64 = 1000;

/// Default (and maximum) issues per search page.
pub const DEFAULT_PER_PAGE: u8 = 100;

/// How the last page number is derived from a target total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageBound {
    /// Pages `1..=total / per_page + 1`.
    ///
    /// Requests one extra page whenever `total` is a multiple of `per_page`.
    #[default]
    Historical,

    /// Pages `1..=ceil(total / per_page)`, at least one.
    Exact,
}

impl PageBound {
    /// Last page to request for `total` results at `per_page` per page.
    #[must_use]
    pub fn last_page(self, total: u64, per_page: u8) -> u32 {
        let per_page = u64::from(per_page.max(1));
        let last = match self {
            Self::Historical => total / per_page + 1,
            Self::Exact => total.div_ceil(per_page).max(1),
        };
        u32::try_from(last).unwrap_or(u32::MAX)
    }
}

/// Last page the search API will serve at `per_page` per page.
#[must_use]
pub fn max_searchable_page(per_page: u8) -> u32 {
    let pages = MAX_SEARCH_RESULTS.div_ceil(u64::from(per_page.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Parameters of one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    /// Number of results to page through. `None` uses the total reported
    /// with the first page.
    pub target_total: Option<u64>,

    /// Issues requested per page (1..=100).
    pub per_page: u8,

    /// Page bound arithmetic.
    pub bound: PageBound,

    /// Whether the issue title is written after the parsed fields.
    pub include_title: bool,
}

impl Default for ExtractionPlan {
    fn default() -> Self {
        Self {
            target_total: None,
            per_page: DEFAULT_PER_PAGE,
            bound: PageBound::default(),
            include_title: true,
        }
    }
}
