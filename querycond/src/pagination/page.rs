//! Page struct for paginated responses.

use super::total_pages;

/// One page of results with its paging metadata.
///
/// # Example
///
/// ```
/// use querycond::Page;
///
/// let page = Page::new(vec!["a", "b"], 42, 1, 20);
/// assert_eq!(page.total_pages, 3);
/// assert!(page.has_next());
/// assert!(!page.has_prev());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Total rows matching the filters.
    pub total: u64,
    /// The page served, after normalization.
    pub page: i64,
    /// Rows per page.
    pub page_size: i64,
    /// Pages needed for `total` rows.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Create a page, computing `total_pages`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: i64, page_size: i64) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }

    /// Whether pages follow this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::try_from(self.page).is_ok_and(|page| page < self.total_pages)
    }

    /// Whether pages precede this one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Transform the rows, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_basic() {
        let page = Page::new(vec![1, 2, 3], 95, 5, 20);
        assert_eq!(page.total_pages, 5);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_page_empty() {
        let page: Page<()> = Page::new(vec![], 0, 1, 20);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2], 2, 1, 20).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }
}
