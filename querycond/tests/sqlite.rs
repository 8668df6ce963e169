//! End-to-end tests running rendered plans against an in-memory `SQLite` database.
//!
//! Validates that the SQL produced by `SqlCollector` actually executes and
//! that counts and pages agree with the request.

use querycond::{
    CompareOp, ConditionSink, Executor, Operator, Page, PageRequest, Param, QueryConfig,
    QueryError, SortField, SqlCollector, Sqlite, Value, build_plan, execute, sqlite,
};
use rusqlite::{Connection, params_from_iter, types::Value as SqlValue};

#[derive(Debug, Clone, PartialEq, Eq)]
struct User {
    id: i64,
    name: String,
    age: i64,
    status: String,
}

/// Executor pairing a collector with a live connection.
struct SqliteExecutor<'c> {
    conn: &'c Connection,
    sql: SqlCollector<Sqlite>,
}

impl<'c> SqliteExecutor<'c> {
    fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            sql: sqlite("users")
                .fields(&["id", "name", "age", "status"])
                .search_columns(&["name", "status"]),
        }
    }
}

fn bind(params: &[Param]) -> Vec<SqlValue> {
    params
        .iter()
        .map(|p| match p {
            Param::Int(i) => SqlValue::Integer(*i),
            Param::Text(s) => SqlValue::Text(s.clone()),
            Param::TextArray(_) => panic!("array parameters are Postgres-only"),
        })
        .collect()
}

impl ConditionSink for SqliteExecutor<'_> {
    fn add_equality(&mut self, field: &str, value: &Value) {
        self.sql.add_equality(field, value);
    }

    fn add_pattern(&mut self, field: &str, pattern: &str) {
        self.sql.add_pattern(field, pattern);
    }

    fn add_membership(&mut self, field: &str, values: &[String]) {
        self.sql.add_membership(field, values);
    }

    fn add_comparison(&mut self, field: &str, op: CompareOp, value: &Value) {
        self.sql.add_comparison(field, op, value);
    }

    fn set_order(&mut self, sorts: &[SortField]) {
        self.sql.set_order(sorts);
    }

    fn set_limit_offset(&mut self, limit: i64, offset: i64) {
        self.sql.set_limit_offset(limit, offset);
    }

    fn set_keyword(&mut self, keyword: &str) {
        self.sql.set_keyword(keyword);
    }
}

impl Executor for SqliteExecutor<'_> {
    type Row = User;
    type Error = rusqlite::Error;

    fn count(&mut self) -> Result<u64, Self::Error> {
        let query = self.sql.count_query();
        let total: i64 = self.conn.query_row(
            &query.sql,
            params_from_iter(bind(&query.params)),
            |row| row.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    fn fetch(&mut self) -> Result<Vec<User>, Self::Error> {
        let query = self.sql.select_query();
        let mut stmt = self.conn.prepare(&query.sql)?;
        let rows = stmt.query_map(params_from_iter(bind(&query.params)), |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                age: row.get(2)?,
                status: row.get(3)?,
            })
        })?;
        rows.collect()
    }
}

fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            status TEXT NOT NULL
        );",
    )
    .unwrap();

    let statuses = ["active", "pending", "banned"];
    for id in 1..=30_i64 {
        conn.execute(
            "INSERT INTO users (id, name, age, status) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                id,
                format!("user{id:02}"),
                15 + id,
                statuses[(id % 3) as usize]
            ],
        )
        .unwrap();
    }
    conn
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn run(conn: &Connection, req: &PageRequest, config: Option<&QueryConfig>) -> Page<User> {
    init_tracing();
    let plan = build_plan(req, config).unwrap();
    execute(&plan, &mut SqliteExecutor::new(conn)).unwrap()
}

#[test]
fn test_default_page() {
    let conn = seeded();
    let page = run(&conn, &PageRequest::new(), None);

    assert_eq!(page.total, 30);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 20);
    assert!(page.has_next());
}

#[test]
fn test_range_filter_with_sort_and_paging() {
    let conn = seeded();
    // ages 16..=45; keep 20 < age <= 30 -> ids 6..=15
    let req = PageRequest::new()
        .page(2)
        .page_size(4)
        .sorts("age:desc")
        .filter(Operator::Gt, "age:20")
        .filter(Operator::Lte, "age:30");
    let page = run(&conn, &req, None);

    assert_eq!(page.total, 10);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<i64> = page.items.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![11, 10, 9, 8]);
}

#[test]
fn test_membership_with_comparison() {
    let conn = seeded();
    let req = PageRequest::new()
        .sorts("id:asc")
        .filter(Operator::In, "status:banned")
        .filter(Operator::In, "status:pending")
        .filter(Operator::Lt, "age:22");
    let page = run(&conn, &req, None);

    // ids 1..=6 have age < 22; active rows are the multiples of 3
    let ids: Vec<i64> = page.items.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
    assert!(page.items.iter().all(|u| u.status != "active"));
}

#[test]
fn test_like_is_contains() {
    let conn = seeded();
    let req = PageRequest::new()
        .sorts("id:asc")
        .filter(Operator::Like, "name:r2");
    let page = run(&conn, &req, None);

    let names: Vec<&str> = page.items.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "user20", "user21", "user22", "user23", "user24", "user25", "user26", "user27",
            "user28", "user29"
        ]
    );
}

#[test]
fn test_invalid_sort_still_serves_page() {
    let conn = seeded();
    let req = PageRequest::new()
        .sorts("age:sideways")
        .filter(Operator::Gte, "age:44");
    let page = run(&conn, &req, None);
    assert_eq!(page.total, 2);
}

#[test]
fn test_keyword_searches_columns() {
    let conn = seeded();
    let req = PageRequest::new().keyword("banned");
    let page = run(&conn, &req, None);
    assert_eq!(page.total, 10);
}

#[test]
fn test_text_equality() {
    let conn = seeded();
    let req = PageRequest::new().filter(Operator::Eq, "name:user07");
    let page = run(&conn, &req, None);
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].age, 22);
}

#[test]
fn test_page_past_end_is_empty() {
    let conn = seeded();
    let page = run(&conn, &PageRequest::new().page(9), None);
    assert_eq!(page.total, 30);
    assert!(page.items.is_empty());
    assert!(!page.has_next());
}

#[test]
fn test_injection_attempt_is_inert() {
    let conn = seeded();
    let req = PageRequest::new().filter(Operator::Eq, "name:x' OR '1'='1");
    let page = run(&conn, &req, None);
    assert_eq!(page.total, 0);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 30);
}

#[test]
fn test_config_rejects_before_database() {
    let conn = seeded();
    let config = QueryConfig::from_json(r#"{"whitelist": {"age": ["gt"]}}"#).unwrap();
    let req = PageRequest::new().filter(Operator::Eq, "status:active");
    assert!(matches!(
        build_plan(&req, Some(&config)),
        Err(QueryError::FieldNotAllowed { .. })
    ));

    let allowed = PageRequest::new().filter(Operator::Gt, "age:40");
    assert_eq!(run(&conn, &allowed, Some(&config)).total, 5);
}

#[test]
fn test_backend_error_is_wrapped() {
    let conn = Connection::open_in_memory().unwrap();
    let plan = build_plan(&PageRequest::new(), None).unwrap();
    let err = execute(&plan, &mut SqliteExecutor::new(&conn)).unwrap_err();

    assert!(!err.is_rejection());
    assert!(err.to_string().starts_with("count failed"));
}
