//! Placeholder and membership syntax per database.

use crate::sql::Param;

/// How a database spells bound parameters and set membership.
pub trait Dialect: Clone + Copy {
    /// Short name, used in log events.
    fn name(&self) -> &'static str;

    /// Placeholder for the 1-based parameter `idx`.
    fn placeholder(&self, idx: usize) -> String;

    /// `field` is one of `values`, with placeholders numbered from `first`.
    ///
    /// Returns the predicate and the parameters it binds, in order.
    fn membership(&self, field: &str, values: &[String], first: usize) -> (String, Vec<Param>);

    /// `field` contains the text bound at `idx`.
    fn contains(&self, field: &str, idx: usize) -> String {
        format!("{field} LIKE '%' || {} || '%'", self.placeholder(idx))
    }
}

/// Postgres: `$1` placeholders, membership as one array parameter.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    #[inline]
    fn placeholder(&self, idx: usize) -> String {
        format!("${idx}")
    }

    fn membership(&self, field: &str, values: &[String], first: usize) -> (String, Vec<Param>) {
        (
            format!("{field} = ANY({})", self.placeholder(first)),
            vec![Param::TextArray(values.to_vec())],
        )
    }
}

/// `SQLite`: `?1` placeholders, membership expanded to one parameter per value.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    #[inline]
    fn placeholder(&self, idx: usize) -> String {
        format!("?{idx}")
    }

    fn membership(&self, field: &str, values: &[String], first: usize) -> (String, Vec<Param>) {
        let slots = (first..first + values.len())
            .map(|idx| self.placeholder(idx))
            .collect::<Vec<_>>()
            .join(", ");
        let params = values.iter().map(|v| Param::Text(v.clone())).collect();
        (format!("{field} IN ({slots})"), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Postgres.placeholder(1), "$1");
        assert_eq!(Postgres.placeholder(12), "$12");
        assert_eq!(Sqlite.placeholder(1), "?1");
        assert_eq!(Sqlite.placeholder(12), "?12");
    }

    #[test]
    fn test_postgres_membership_binds_one_array() {
        let (sql, params) = Postgres.membership("status", &texts(&["a", "b"]), 3);
        assert_eq!(sql, "status = ANY($3)");
        assert_eq!(params, vec![Param::TextArray(texts(&["a", "b"]))]);
    }

    #[test]
    fn test_sqlite_membership_expands() {
        let (sql, params) = Sqlite.membership("status", &texts(&["a", "b", "c"]), 2);
        assert_eq!(sql, "status IN (?2, ?3, ?4)");
        assert_eq!(
            params,
            vec![
                Param::Text("a".into()),
                Param::Text("b".into()),
                Param::Text("c".into()),
            ]
        );
    }

    #[test]
    fn test_sqlite_membership_single() {
        let (sql, params) = Sqlite.membership("id", &texts(&["7"]), 1);
        assert_eq!(sql, "id IN (?1)");
        assert_eq!(params, vec![Param::Text("7".into())]);
    }

    #[test]
    fn test_contains_reuses_placeholder_text() {
        assert_eq!(Postgres.contains("name", 2), "name LIKE '%' || $2 || '%'");
        assert_eq!(Sqlite.contains("email", 1), "email LIKE '%' || ?1 || '%'");
    }

    #[test]
    fn test_names() {
        assert_eq!(Postgres.name(), "postgres");
        assert_eq!(Sqlite.name(), "sqlite");
    }
}
