//! Parameterized SQL rendering of a query plan.
//!
//! [`SqlCollector`] is a [`ConditionSink`] that records the verbs a plan
//! replays and renders them as a `SELECT` for the page and a
//! `SELECT COUNT(*)` for the total. Values always travel as parameters;
//! only validated identifiers are spliced into the SQL text.
//!
//! # Example
//!
//! ```
//! use querycond::{build_plan, postgres, Operator, PageRequest};
//!
//! let req = PageRequest::new()
//!     .page(2)
//!     .sorts("age:desc")
//!     .filter(Operator::Gte, "age:18")
//!     .filter(Operator::Like, "name:ann");
//! let plan = build_plan(&req, None).unwrap();
//!
//! let mut sql = postgres("users").fields(&["id", "name", "age"]);
//! plan.apply(&mut sql);
//!
//! let select = sql.select_query();
//! assert_eq!(
//!     select.sql,
//!     "SELECT id, name, age FROM users WHERE name LIKE $1 AND age >= $2 \
//!      ORDER BY age DESC LIMIT 20 OFFSET 20"
//! );
//! assert_eq!(
//!     sql.count_query().sql,
//!     "SELECT COUNT(*) FROM users WHERE name LIKE $1 AND age >= $2"
//! );
//! ```

use crate::dialect::{Dialect, Postgres, Sqlite};
use crate::execute::ConditionSink;
use crate::validate::assert_safe_identifier;
use crate::{CompareOp, SortField, Value};

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Integer parameter.
    Int(i64),
    /// Text parameter.
    Text(String),
    /// Postgres array parameter for `= ANY($n)`.
    TextArray(Vec<String>),
}

impl From<&Value> for Param {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(i) => Self::Int(*i),
            Value::String(s) => Self::Text(s.clone()),
        }
    }
}

/// Rendered SQL with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "QueryResult must be used to execute the query"]
pub struct QueryResult {
    /// SQL text with placeholders.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: Vec<Param>,
}

#[derive(Debug, Clone)]
enum Predicate {
    Equal(String, Value),
    Compare(String, CompareOp, Value),
    Pattern(String, String),
    Membership(String, Vec<String>),
}

/// Collects a plan and renders it as parameterized SQL for one table.
#[derive(Debug, Clone)]
pub struct SqlCollector<D: Dialect> {
    dialect: D,
    table: String,
    fields: Vec<String>,
    search_columns: Vec<String>,
    predicates: Vec<Predicate>,
    keyword: Option<String>,
    sorts: Vec<SortField>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl<D: Dialect> SqlCollector<D> {
    /// Create a collector for the given table.
    ///
    /// # Panics
    ///
    /// Panics if the table name is not a valid SQL identifier.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        let table = table.into();
        assert_safe_identifier(&table, "table");
        Self {
            dialect,
            table,
            fields: Vec::new(),
            search_columns: Vec::new(),
            predicates: Vec::new(),
            keyword: None,
            sorts: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Set the fields to SELECT. Empty selects `*`.
    ///
    /// # Panics
    ///
    /// Panics if any field name is not a valid SQL identifier.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        for field in fields {
            assert_safe_identifier(field, "field");
        }
        self.fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Columns the keyword is matched against, OR'd together.
    ///
    /// Without search columns the keyword is ignored.
    ///
    /// # Panics
    ///
    /// Panics if any column name is not a valid SQL identifier.
    pub fn search_columns(mut self, columns: &[&str]) -> Self {
        for column in columns {
            assert_safe_identifier(column, "search column");
        }
        self.search_columns = columns.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Render the page query.
    pub fn select_query(&self) -> QueryResult {
        let select = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };

        let mut params = Vec::new();
        let mut sql = format!("SELECT {select} FROM {}", self.table);
        self.push_where(&mut sql, &mut params);

        if !self.sorts.is_empty() {
            let sort_parts: Vec<String> = self
                .sorts
                .iter()
                .map(|s| format!("{} {}", s.field, s.dir.as_sql()))
                .collect();
            sql.push_str(&format!(" ORDER BY {}", sort_parts.join(", ")));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        tracing::trace!(dialect = self.dialect.name(), sql = %sql, "rendered select");
        QueryResult { sql, params }
    }

    /// Render the total-count query: same predicates, no order or window.
    pub fn count_query(&self) -> QueryResult {
        let mut params = Vec::new();
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        self.push_where(&mut sql, &mut params);
        tracing::trace!(dialect = self.dialect.name(), sql = %sql, "rendered count");
        QueryResult { sql, params }
    }

    fn push_where(&self, sql: &mut String, params: &mut Vec<Param>) {
        let mut conditions = Vec::new();

        for predicate in &self.predicates {
            let idx = params.len() + 1;
            let condition = match predicate {
                Predicate::Equal(field, value) => {
                    params.push(value.into());
                    format!("{field} = {}", self.dialect.placeholder(idx))
                },
                Predicate::Compare(field, op, value) => {
                    params.push(value.into());
                    format!("{field} {} {}", op.symbol(), self.dialect.placeholder(idx))
                },
                Predicate::Pattern(field, pattern) => {
                    params.push(Param::Text(pattern.clone()));
                    format!("{field} LIKE {}", self.dialect.placeholder(idx))
                },
                // Matches nothing, consistent across dialects
                Predicate::Membership(_, values) if values.is_empty() => "1=0".to_string(),
                Predicate::Membership(field, values) => {
                    let (condition, new_params) = self.dialect.membership(field, values, idx);
                    params.extend(new_params);
                    condition
                },
            };
            conditions.push(condition);
        }

        if let Some(keyword) = &self.keyword
            && !self.search_columns.is_empty()
        {
            let idx = params.len() + 1;
            params.push(Param::Text(keyword.clone()));
            let matches: Vec<String> = self
                .search_columns
                .iter()
                .map(|column| self.dialect.contains(column, idx))
                .collect();
            conditions.push(format!("({})", matches.join(" OR ")));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
    }
}

/// Field names reach the collector through public verbs, so each is checked
/// again here. Plans built by [`QueryPlan::build`](crate::QueryPlan::build)
/// only carry authorized fields and never trip these assertions.
impl<D: Dialect> ConditionSink for SqlCollector<D> {
    fn add_equality(&mut self, field: &str, value: &Value) {
        assert_safe_identifier(field, "filter field");
        self.predicates
            .push(Predicate::Equal(field.to_string(), value.clone()));
    }

    fn add_pattern(&mut self, field: &str, pattern: &str) {
        assert_safe_identifier(field, "filter field");
        self.predicates
            .push(Predicate::Pattern(field.to_string(), pattern.to_string()));
    }

    fn add_membership(&mut self, field: &str, values: &[String]) {
        assert_safe_identifier(field, "filter field");
        self.predicates
            .push(Predicate::Membership(field.to_string(), values.to_vec()));
    }

    fn add_comparison(&mut self, field: &str, op: CompareOp, value: &Value) {
        assert_safe_identifier(field, "filter field");
        self.predicates
            .push(Predicate::Compare(field.to_string(), op, value.clone()));
    }

    fn set_order(&mut self, sorts: &[SortField]) {
        for sort in sorts {
            assert_safe_identifier(&sort.field, "sort field");
        }
        self.sorts = sorts.to_vec();
    }

    fn set_limit_offset(&mut self, limit: i64, offset: i64) {
        self.limit = Some(limit);
        self.offset = Some(offset);
    }

    fn set_keyword(&mut self, keyword: &str) {
        self.keyword = Some(keyword.to_string());
    }
}

/// Collect a query for Postgres.
#[must_use]
pub fn postgres(table: &str) -> SqlCollector<Postgres> {
    SqlCollector::new(Postgres, table)
}

/// Collect a query for `SQLite`.
#[must_use]
pub fn sqlite(table: &str) -> SqlCollector<Sqlite> {
    SqlCollector::new(Sqlite, table)
}
