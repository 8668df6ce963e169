//! Sort string parsing.

use super::types::{SortDir, SortField};
use crate::error::QueryError;
use crate::validate::is_safe_identifier;

impl SortDir {
    /// Parse a direction, ignoring ASCII case. Only `ASC` and `DESC` are accepted.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

impl SortField {
    /// Parse a sort string like `"age:ASC,name:desc"` into sort fields.
    ///
    /// An empty (or all-whitespace) string yields no sort fields. Each
    /// comma-separated fragment must be exactly one `field:direction` pair
    /// whose field is a non-empty safe identifier and whose direction is
    /// `ASC` or `DESC` in any case. One bad fragment fails the whole string.
    ///
    /// # Example
    ///
    /// ```
    /// use querycond::{SortDir, SortField};
    ///
    /// let sorts = SortField::parse_sort_string("age:asc, name:DESC").unwrap();
    /// assert_eq!(sorts, vec![
    ///     SortField::new("age", SortDir::Asc),
    ///     SortField::new("name", SortDir::Desc),
    /// ]);
    ///
    /// assert!(SortField::parse_sort_string("").unwrap().is_empty());
    /// assert!(SortField::parse_sort_string("age:upward").is_err());
    /// ```
    pub fn parse_sort_string(sort: &str) -> Result<Vec<Self>, QueryError> {
        if sort.trim().is_empty() {
            return Ok(Vec::new());
        }

        sort.split(',').map(Self::parse_fragment).collect()
    }

    fn parse_fragment(fragment: &str) -> Result<Self, QueryError> {
        let fragment = fragment.trim();
        let malformed = || QueryError::MalformedSort {
            fragment: fragment.to_string(),
        };

        let (field, direction) = fragment.split_once(':').ok_or_else(malformed)?;
        if direction.contains(':') {
            return Err(malformed());
        }
        let (field, direction) = (field.trim(), direction.trim());

        if field.is_empty() || !is_safe_identifier(field) {
            return Err(QueryError::UnsafeIdentifier {
                field: field.to_string(),
            });
        }

        let dir = SortDir::from_name(direction).ok_or_else(|| QueryError::InvalidSortDirection {
            field: field.to_string(),
            direction: direction.to_string(),
        })?;

        Ok(Self::new(field, dir))
    }
}

/// Parse a sort string. See [`SortField::parse_sort_string`].
pub fn parse_sort(sort: &str) -> Result<Vec<SortField>, QueryError> {
    SortField::parse_sort_string(sort)
}
