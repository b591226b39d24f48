//! Pagination
//!
//! Page numbers are lenient: a page that is not an integer falls back to the first page and a page
//! outside `1..=last` falls back to the last page. A page size that is not a positive integer is a
//! paginator fault, which callers answer with an empty list.

/// Page size used when the request names none.
pub const DEFAULT_PER_PAGE: u64 = 5;

/// Raw pagination query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page number.
    pub page: Option<String>,

    /// Requested page size.
    pub per_page: Option<String>,
}

/// A resolved slice of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// One-based page number actually served.
    pub number: u64,

    /// Rows to skip.
    pub offset: u64,

    /// Rows to take.
    pub limit: u64,
}

impl PageRequest {
    /// Build a request from already-parsed values.
    #[must_use]
    pub fn new(page: Option<String>, per_page: Option<String>) -> Self {
        Self { page, per_page }
    }

    /// Resolve against a result set of `count` rows.
    ///
    /// Returns `None` on a paginator fault.
    #[must_use]
    pub fn resolve(&self, count: u64) -> Option<PageWindow> {
        let per_page = match self.per_page.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PER_PAGE,
            Some(raw) => raw.parse::<u64>().ok().filter(|size| *size > 0)?,
        };

        let last = count.div_ceil(per_page).max(1);

        let number = match self.page.as_deref().map(|raw| raw.trim().parse::<i64>().ok()) {
            None | Some(None) => 1,
            Some(Some(requested)) if requested < 1 => last,
            Some(Some(requested)) => u64::try_from(requested)
                .ok()
                .filter(|requested| *requested <= last)
                .unwrap_or(last),
        };

        Some(PageWindow {
            number,
            offset: (number - 1).saturating_mul(per_page),
            limit: per_page,
        })
    }
}
