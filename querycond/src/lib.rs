// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs
#![allow(clippy::missing_errors_doc)] // Error variants are documented on QueryError
#![allow(clippy::missing_panics_doc)] // Identifier assertions documented at the collector
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::format_push_string)] // String building style preference
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs

//! # querycond - validated query plans from string-encoded parameters
//!
//! Turns a [`PageRequest`] (page, page size, a sort string, a keyword and one
//! raw `field:value` list per operator) into a [`QueryPlan`]: conditions that
//! passed identifier checks and the optional whitelist/blacklist policy of a
//! [`QueryConfig`], the parsed ordering, and limit/offset.
//!
//! The plan is replayed onto any [`ConditionSink`]; the crate itself never
//! touches a database. [`SqlCollector`] renders parameterized SQL for
//! Postgres and `SQLite`.
//!
//! ## Quick Start
//!
//! ```
//! use querycond::prelude::*;
//!
//! let config = QueryConfig::new()
//!     .allow("age", &[Operator::Gte, Operator::Lt])
//!     .allow("status", &[Operator::In])
//!     .deny(&["password"]);
//!
//! let req = PageRequest::new()
//!     .page(2)
//!     .page_size(10)
//!     .sorts("age:desc")
//!     .filter(Operator::Gte, "age:18")
//!     .filter(Operator::In, "status:active,status:pending");
//!
//! let plan = build_plan(&req, Some(&config)).unwrap();
//! assert_eq!((plan.page, plan.limit, plan.offset), (2, 10, 10));
//!
//! let mut sql = postgres("users").fields(&["id", "age", "status"]);
//! plan.apply(&mut sql);
//! assert_eq!(
//!     sql.select_query().sql,
//!     "SELECT id, age, status FROM users WHERE status = ANY($1) AND age >= $2 \
//!      ORDER BY age DESC LIMIT 10 OFFSET 10"
//! );
//! ```
//!
//! ## Filter Encoding
//!
//! Each operator has its own list of raw strings. A raw string is one or more
//! comma-separated `field:value` pairs.
//!
//! | Operator | Raw | Condition |
//! |----------|-----|-----------|
//! | `eq` | `age:30` | `age = 30` |
//! | `like` | `name:ann` | `name LIKE '%ann%'` |
//! | `in` | `status:a,status:b` | `status IN ('a', 'b')` |
//! | `gt` | `age:18` | `age > 18` |
//! | `gte` | `age:18` | `age >= 18` |
//! | `lt` | `age:65` | `age < 65` |
//! | `lte` | `age:65` | `age <= 65` |
//!
//! Values that parse as base-10 integers compare numerically, everything else
//! as text. For single-valued operators the last value for a field wins; `in`
//! accumulates values per field across all of its raw strings.
//!
//! ## Sorting
//!
//! `"age:desc,name:asc"`. Directions are case-insensitive. An invalid sort
//! string is logged and the plan carries no ordering; an invalid filter fails
//! the whole request.

mod builder;
mod config;
mod dialect;
mod error;
mod execute;
mod pagination;
mod plan;
mod request;
mod sql;
mod validate;

pub use builder::{
    CompareOp, Condition, Operator, SortDir, SortField, Value, ValueKind, build_conditions,
    parse_in_pairs, parse_pairs, parse_sort,
};
pub use config::QueryConfig;
pub use dialect::{Dialect, Postgres, Sqlite};
pub use error::{BoxError, ConfigError, QueryError};
pub use execute::{ConditionSink, Executor, execute};
pub use pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_ENV, MAX_PAGE_SIZE_ENV, Page, PageWindow, Pagination,
    limit, offset, total_pages,
};
pub use plan::{QueryPlan, build_plan};
pub use request::PageRequest;
pub use sql::{Param, QueryResult, SqlCollector, postgres, sqlite};
pub use validate::{assert_safe_identifier, authorize, is_safe_identifier};

/// Prelude module for convenient imports.
///
/// ```
/// use querycond::prelude::*;
///
/// let plan = build_plan(&PageRequest::new(), None).unwrap();
/// let mut sql = sqlite("users");
/// plan.apply(&mut sql);
/// assert_eq!(sql.select_query().sql, "SELECT * FROM users LIMIT 20 OFFSET 0");
/// ```
pub mod prelude {
    pub use crate::{
        CompareOp, Condition, ConditionSink, ConfigError, Dialect, Executor, Operator, Page,
        PageRequest, Pagination, Param, Postgres, QueryConfig, QueryError, QueryPlan, QueryResult,
        SortDir, SortField, SqlCollector, Sqlite, Value, build_plan, execute, postgres, sqlite,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
