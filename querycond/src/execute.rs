//! The narrow interface to the persistence layer.
//!
//! The crate never talks to a database. A [`QueryPlan`] is replayed onto a
//! [`ConditionSink`] through a handful of verbs; an [`Executor`] adds the two
//! blocking calls, `count` and `fetch`, and owns connections, retries and
//! cancellation itself.
//!
//! [`SqlCollector`](crate::SqlCollector) is a ready-made sink that renders
//! parameterized SQL.

use crate::error::QueryError;
use crate::{CompareOp, Page, QueryPlan, SortField, Value};

/// Receives the predicates, ordering and bounds of a plan.
pub trait ConditionSink {
    /// `field = value`
    fn add_equality(&mut self, field: &str, value: &Value);

    /// `field LIKE pattern`. The pattern already carries its `%` wildcards.
    fn add_pattern(&mut self, field: &str, pattern: &str);

    /// `field IN (values...)`
    fn add_membership(&mut self, field: &str, values: &[String]);

    /// `field <op> value`
    fn add_comparison(&mut self, field: &str, op: CompareOp, value: &Value);

    /// Replace the ordering. An empty slice means no ordering.
    fn set_order(&mut self, sorts: &[SortField]);

    /// Set the row window.
    fn set_limit_offset(&mut self, limit: i64, offset: i64);

    /// Free-text search over columns the sink chooses. Ignored by default.
    fn set_keyword(&mut self, keyword: &str) {
        let _ = keyword;
    }
}

/// A sink that can also run the query it collected.
pub trait Executor: ConditionSink {
    /// One result row.
    type Row;
    /// Backend error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Count rows matching the collected predicates, ignoring limit/offset.
    fn count(&mut self) -> Result<u64, Self::Error>;

    /// Fetch the rows of the collected window.
    fn fetch(&mut self) -> Result<Vec<Self::Row>, Self::Error>;
}

/// Apply a plan to an executor, then count and fetch one page.
///
/// Backend failures are wrapped as [`QueryError::ExecutionFailure`] naming
/// the verb that failed.
pub fn execute<E: Executor + ?Sized>(
    plan: &QueryPlan,
    executor: &mut E,
) -> Result<Page<E::Row>, QueryError> {
    plan.apply(executor);

    let total = executor.count().map_err(|err| {
        tracing::debug!(error = %err, "count failed");
        QueryError::execution("count", err)
    })?;

    let items = executor.fetch().map_err(|err| {
        tracing::debug!(error = %err, "fetch failed");
        QueryError::execution("fetch", err)
    })?;

    Ok(Page::new(items, total, plan.page, plan.limit))
}
