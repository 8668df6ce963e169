//! Offset pagination arithmetic.
//!
//! | Input                 | Read as                           |
//! |-----------------------|-----------------------------------|
//! | `page < 1`            | page 1                            |
//! | `page_size <= 0`      | the default page size (20)        |
//! | `page_size > max`     | `max`, only when a cap is set     |
//!
//! The normalized page is returned alongside limit and offset, never written
//! back into the request, so a response can echo the page actually served.
//!
//! # Example
//!
//! ```
//! use querycond::{Pagination, total_pages};
//!
//! let window = Pagination::new().window(0, 0);
//! assert_eq!((window.page, window.limit, window.offset), (1, 20, 0));
//!
//! assert_eq!(total_pages(95, 20), 5);
//! assert_eq!(total_pages(100, 20), 5);
//! ```

mod page;

pub use page::Page;

/// Page size used when the request asks for 0 or fewer rows.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Environment variable overriding [`DEFAULT_PAGE_SIZE`] in [`Pagination::from_env`].
pub const DEFAULT_PAGE_SIZE_ENV: &str = "QUERYCOND_DEFAULT_PAGE_SIZE";

/// Environment variable setting [`Pagination::max_page_size`] in [`Pagination::from_env`].
pub const MAX_PAGE_SIZE_ENV: &str = "QUERYCOND_MAX_PAGE_SIZE";

/// Page size resolved from a possibly non-positive request value.
///
/// There is no upper bound; see [`Pagination::with_max_page_size`] for a cap.
#[inline]
#[must_use]
pub const fn limit(page_size: i64, default: i64) -> i64 {
    if page_size <= 0 { default } else { page_size }
}

/// Row offset for a page, plus the page actually used.
///
/// Pages below 1 are read as 1. Returns `(offset, page)`.
#[inline]
#[must_use]
pub const fn offset(page: i64, limit: i64) -> (i64, i64) {
    let page = if page < 1 { 1 } else { page };
    ((page - 1).saturating_mul(limit), page)
}

/// Number of pages needed for `total` rows: the quotient, plus one for a
/// partial last page. Zero when `page_size` is not positive.
#[must_use]
pub fn total_pages(total: u64, page_size: i64) -> u64 {
    let Ok(page_size) = u64::try_from(page_size) else {
        return 0;
    };
    if page_size == 0 {
        return 0;
    }
    total / page_size + u64::from(total % page_size != 0)
}

/// Resolved paging bounds for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The page served, always at least 1.
    pub page: i64,
    /// Rows per page.
    pub limit: i64,
    /// Rows skipped.
    pub offset: i64,
}

/// Paging policy: default page size and an optional cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page size used for requests with a page size of 0 or less.
    pub default_page_size: i64,
    /// Largest page size served. `None` serves any size.
    pub max_page_size: Option<i64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    /// Default page size 20, no cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
        }
    }

    /// Read the policy from `QUERYCOND_DEFAULT_PAGE_SIZE` and
    /// `QUERYCOND_MAX_PAGE_SIZE`.
    ///
    /// Unset, unparsable, or non-positive values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.trim().parse::<i64>().ok())
                .filter(|v| *v > 0)
        };

        let mut pagination = Self::new();
        if let Some(size) = read(DEFAULT_PAGE_SIZE_ENV) {
            pagination = pagination.with_default_page_size(size);
        }
        if let Some(max) = read(MAX_PAGE_SIZE_ENV) {
            pagination = pagination.with_max_page_size(max);
        }
        pagination
    }

    /// Set the default page size. Non-positive values are ignored.
    #[must_use]
    pub const fn with_default_page_size(mut self, size: i64) -> Self {
        if size > 0 {
            self.default_page_size = size;
        }
        self
    }

    /// Cap the page size.
    ///
    /// Without a cap, a request may ask for any number of rows per page.
    /// Non-positive values are ignored.
    #[must_use]
    pub const fn with_max_page_size(mut self, max: i64) -> Self {
        if max > 0 {
            self.max_page_size = Some(max);
        }
        self
    }

    /// Page size for a request value, after the default and the cap.
    #[must_use]
    pub const fn limit(&self, page_size: i64) -> i64 {
        let limit = limit(page_size, self.default_page_size);
        match self.max_page_size {
            Some(max) if limit > max => max,
            _ => limit,
        }
    }

    /// Resolve page, limit and offset for a request.
    #[must_use]
    pub const fn window(&self, page: i64, page_size: i64) -> PageWindow {
        let limit = self.limit(page_size);
        let (offset, page) = offset(page, limit);
        PageWindow {
            page,
            limit,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults() {
        assert_eq!(limit(0, 20), 20);
        assert_eq!(limit(-5, 20), 20);
        assert_eq!(limit(50, 20), 50);
        // No cap by default
        assert_eq!(limit(1_000_000, 20), 1_000_000);
    }

    #[test]
    fn test_offset_normalizes_page() {
        assert_eq!(offset(0, 20), (0, 1));
        assert_eq!(offset(-3, 20), (0, 1));
        assert_eq!(offset(1, 20), (0, 1));
        assert_eq!(offset(3, 20), (40, 3));
    }

    #[test]
    fn test_offset_saturates() {
        assert_eq!(offset(i64::MAX, 20), (i64::MAX, i64::MAX));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(95, 20), 5);
        assert_eq!(total_pages(100, 20), 5);
        assert_eq!(total_pages(101, 20), 6);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(10, 0), 0);
        assert_eq!(total_pages(10, -1), 0);
    }

    #[test]
    fn test_window_zero_request() {
        let window = Pagination::new().window(0, 0);
        assert_eq!(
            window,
            PageWindow {
                page: 1,
                limit: 20,
                offset: 0,
            }
        );
    }

    #[test]
    fn test_window_with_cap() {
        let pagination = Pagination::new().with_max_page_size(100);
        assert_eq!(pagination.limit(500), 100);
        assert_eq!(pagination.limit(50), 50);
        assert_eq!(pagination.limit(0), 20);

        let window = pagination.window(2, 500);
        assert_eq!(window.offset, 100);
    }

    #[test]
    fn test_custom_default() {
        let pagination = Pagination::new().with_default_page_size(10);
        assert_eq!(pagination.limit(0), 10);
        assert_eq!(pagination.window(3, 0).offset, 20);

        // Ignored
        let pagination = Pagination::new()
            .with_default_page_size(0)
            .with_max_page_size(-1);
        assert_eq!(pagination, Pagination::new());
    }

    #[test]
    fn test_from_env_without_vars() {
        // Names unlikely to be set in a test environment
        let unset = |name: &str| std::env::var(name).is_err();
        if unset(DEFAULT_PAGE_SIZE_ENV) && unset(MAX_PAGE_SIZE_ENV) {
            assert_eq!(Pagination::from_env(), Pagination::new());
        }
    }
}
