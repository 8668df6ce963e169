//! The per-request input to plan building.

use crate::Operator;

/// Loosely-typed paging, sorting and filtering parameters for one request.
///
/// An external decoder (query string, JSON body, RPC message) fills this in.
/// Nothing here is validated until [`QueryPlan::build`](crate::QueryPlan::build)
/// runs.
///
/// Each filter list holds raw `field:value` strings, one or more per entry,
/// comma-separated.
///
/// # Example
///
/// ```
/// use querycond::{Operator, PageRequest};
///
/// let req = PageRequest::new()
///     .page(2)
///     .page_size(50)
///     .sorts("created_at:DESC")
///     .filter(Operator::Eq, "status:active")
///     .filter(Operator::Gte, "age:18");
///
/// assert_eq!(req.raw(Operator::Eq), ["status:active"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number. Values below 1 are read as 1.
    pub page: i64,
    /// Rows per page. Values of 0 or less are read as the default.
    pub page_size: i64,
    /// Sort string, e.g. `"age:ASC,name:DESC"`.
    pub sorts: String,
    /// Free-text keyword for the collaborator's own search columns.
    pub keyword: String,
    /// `eq` filters.
    pub eq: Vec<String>,
    /// `like` filters.
    pub like: Vec<String>,
    /// `in` filters. Values for one field accumulate across entries.
    pub in_: Vec<String>,
    /// `gt` filters.
    pub gt: Vec<String>,
    /// `gte` filters.
    pub gte: Vec<String>,
    /// `lt` filters.
    pub lt: Vec<String>,
    /// `lte` filters.
    pub lte: Vec<String>,
}

impl PageRequest {
    /// Create an empty request: page 0 and page size 0, i.e. first page, default size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number.
    #[must_use]
    pub const fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the sort string.
    #[must_use]
    pub fn sorts(mut self, sorts: impl Into<String>) -> Self {
        self.sorts = sorts.into();
        self
    }

    /// Set the search keyword.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Append a raw filter entry to an operator's list.
    #[must_use]
    pub fn filter(mut self, operator: Operator, raw: impl Into<String>) -> Self {
        self.raw_mut(operator).push(raw.into());
        self
    }

    /// Raw entries for an operator.
    #[must_use]
    pub fn raw(&self, operator: Operator) -> &[String] {
        match operator {
            Operator::Eq => &self.eq,
            Operator::Like => &self.like,
            Operator::In => &self.in_,
            Operator::Gt => &self.gt,
            Operator::Gte => &self.gte,
            Operator::Lt => &self.lt,
            Operator::Lte => &self.lte,
        }
    }

    /// Mutable raw entries for an operator.
    pub fn raw_mut(&mut self, operator: Operator) -> &mut Vec<String> {
        match operator {
            Operator::Eq => &mut self.eq,
            Operator::Like => &mut self.like,
            Operator::In => &mut self.in_,
            Operator::Gt => &mut self.gt,
            Operator::Gte => &mut self.gte,
            Operator::Lt => &mut self.lt,
            Operator::Lte => &mut self.lte,
        }
    }

    /// Whether any filter list has entries.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        Operator::ALL.iter().any(|op| !self.raw(*op).is_empty())
    }
}
