//! Query plan construction.

use crate::builder::{build_conditions, parse_sort};
use crate::error::QueryError;
use crate::execute::ConditionSink;
use crate::{Condition, PageRequest, Pagination, QueryConfig, SortField};

/// Fully resolved predicates, ordering and paging bounds for one request.
///
/// Conditions combine with `AND`. Built per request, applied to a
/// [`ConditionSink`] once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "QueryPlan must be applied to a sink or executed"]
pub struct QueryPlan {
    /// Authorized conditions, in operator order.
    pub conditions: Vec<Condition>,
    /// Ordering. Empty when the sort string was blank or invalid.
    pub sorts: Vec<SortField>,
    /// Rows per page.
    pub limit: i64,
    /// Rows skipped.
    pub offset: i64,
    /// The page served, after normalization. Echo this back to the caller.
    pub page: i64,
    /// Trimmed search keyword, if any.
    pub keyword: Option<String>,
}

impl QueryPlan {
    /// Build a plan from a request.
    ///
    /// Filter parsing and authorization failures abort the build. An invalid
    /// sort string does not: it is logged and the plan carries no sort.
    ///
    /// # Example
    ///
    /// ```
    /// use querycond::{Operator, PageRequest, Pagination, QueryConfig, QueryPlan};
    ///
    /// let config = QueryConfig::new()
    ///     .allow("age", &[Operator::Gt, Operator::Lt])
    ///     .allow("name", &[Operator::Like]);
    ///
    /// let req = PageRequest::new()
    ///     .page(0)
    ///     .sorts("age:up")
    ///     .filter(Operator::Gt, "age:18")
    ///     .filter(Operator::Like, "name:ann");
    ///
    /// let plan = QueryPlan::build(&req, Some(&config), &Pagination::new()).unwrap();
    /// assert_eq!(plan.conditions.len(), 2);
    /// assert!(plan.sorts.is_empty());
    /// assert_eq!((plan.page, plan.limit, plan.offset), (1, 20, 0));
    /// ```
    pub fn build(
        req: &PageRequest,
        config: Option<&QueryConfig>,
        pagination: &Pagination,
    ) -> Result<Self, QueryError> {
        let conditions = build_conditions(req, config).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected query filters");
        })?;

        let sorts = parse_sort(&req.sorts).unwrap_or_else(|err| {
            tracing::warn!(sorts = %req.sorts, error = %err, "ignoring invalid sort");
            Vec::new()
        });

        let window = pagination.window(req.page, req.page_size);

        let keyword = req.keyword.trim();
        let keyword = (!keyword.is_empty()).then(|| keyword.to_string());

        let plan = Self {
            conditions,
            sorts,
            limit: window.limit,
            offset: window.offset,
            page: window.page,
            keyword,
        };

        tracing::debug!(
            conditions = plan.conditions.len(),
            sorts = plan.sorts.len(),
            page = plan.page,
            limit = plan.limit,
            offset = plan.offset,
            "built query plan"
        );

        Ok(plan)
    }

    /// Replay the plan onto a sink: conditions in order, then keyword, order,
    /// and limit/offset.
    pub fn apply<S: ConditionSink + ?Sized>(&self, sink: &mut S) {
        for condition in &self.conditions {
            match condition {
                Condition::Equal { field, value } => sink.add_equality(field, value),
                Condition::Compare { field, op, value } => sink.add_comparison(field, *op, value),
                Condition::Contains { field, pattern } => sink.add_pattern(field, pattern),
                Condition::Membership { field, values } => sink.add_membership(field, values),
            }
        }
        if let Some(keyword) = &self.keyword {
            sink.set_keyword(keyword);
        }
        sink.set_order(&self.sorts);
        sink.set_limit_offset(self.limit, self.offset);
    }
}

/// Build a plan with the default paging policy.
///
/// Shorthand for [`QueryPlan::build`] with [`Pagination::new`].
pub fn build_plan(
    req: &PageRequest,
    config: Option<&QueryConfig>,
) -> Result<QueryPlan, QueryError> {
    QueryPlan::build(req, config, &Pagination::new())
}
