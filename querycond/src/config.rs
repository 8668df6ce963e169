//! Field/operator authorization policy.
//!
//! A [`QueryConfig`] is built once when a table or service is registered and
//! shared read-only between request handlers. Configs from several sources
//! (code defaults, a JSON document, per-tenant overrides) combine with
//! [`QueryConfig::merge`].
//!
//! # JSON format
//!
//! ```json
//! {
//!     "whitelist": { "age": ["eq", "gt", "lt"], "name": ["eq", "like"] },
//!     "blacklist": ["password", "ssn"]
//! }
//! ```
//!
//! Both keys are optional.

use crate::error::ConfigError;
use crate::Operator;
use indexmap::{IndexMap, IndexSet};
use miniserde::json::Value as JsonValue;

/// Per-field operator whitelist plus a field blacklist.
///
/// - An empty whitelist places no restriction on fields or operators.
/// - A non-empty whitelist admits only the listed fields, each only with its
///   listed operators.
/// - Blacklisted fields are always rejected, whitelisted or not.
///
/// Equality ignores insertion order.
///
/// # Example
///
/// ```
/// use querycond::{Operator, QueryConfig};
///
/// let config = QueryConfig::new()
///     .allow("age", &[Operator::Eq, Operator::Gt])
///     .allow("name", &[Operator::Like])
///     .deny(&["password"]);
///
/// assert!(config.is_blacklisted("password"));
/// assert_eq!(config.allowed_operators("age").map(|ops| ops.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConfig {
    whitelist: IndexMap<String, IndexSet<Operator>>,
    blacklist: IndexSet<String>,
}

impl QueryConfig {
    /// Create an open config: no whitelist, no blacklist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `ops` on `field`, in addition to anything already allowed.
    #[must_use]
    pub fn allow(mut self, field: impl Into<String>, ops: &[Operator]) -> Self {
        self.whitelist
            .entry(field.into())
            .or_default()
            .extend(ops.iter().copied());
        self
    }

    /// Blacklist fields.
    #[must_use]
    pub fn deny(mut self, fields: &[&str]) -> Self {
        self.blacklist.extend(fields.iter().map(|f| (*f).to_string()));
        self
    }

    /// The whitelist, field to allowed operators.
    #[must_use]
    pub const fn whitelist(&self) -> &IndexMap<String, IndexSet<Operator>> {
        &self.whitelist
    }

    /// The blacklisted fields.
    #[must_use]
    pub const fn blacklist(&self) -> &IndexSet<String> {
        &self.blacklist
    }

    /// Whether the whitelist is empty, i.e. any non-blacklisted field is allowed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.whitelist.is_empty()
    }

    /// Whether `field` is blacklisted.
    #[must_use]
    pub fn is_blacklisted(&self, field: &str) -> bool {
        self.blacklist.contains(field)
    }

    /// Operators whitelisted for `field`, if the field is whitelisted.
    #[must_use]
    pub fn allowed_operators(&self, field: &str) -> Option<&IndexSet<Operator>> {
        self.whitelist.get(field)
    }

    /// Merge `other` into this config.
    ///
    /// Operator sets for the same field union, keeping first-seen order;
    /// blacklists union.
    #[must_use]
    pub fn merge_with(mut self, other: &Self) -> Self {
        for (field, ops) in &other.whitelist {
            self.whitelist
                .entry(field.clone())
                .or_default()
                .extend(ops.iter().copied());
        }
        self.blacklist.extend(other.blacklist.iter().cloned());
        self
    }

    /// Merge any number of configs into one.
    ///
    /// The result's content does not depend on input order.
    ///
    /// ```
    /// use querycond::{Operator, QueryConfig};
    ///
    /// let a = QueryConfig::new().allow("age", &[Operator::Eq]);
    /// let b = QueryConfig::new().allow("age", &[Operator::Gt]);
    ///
    /// let ab = QueryConfig::merge([&a, &b]);
    /// let ba = QueryConfig::merge([&b, &a]);
    /// assert_eq!(ab, ba);
    /// assert_eq!(ab.allowed_operators("age").map(|ops| ops.len()), Some(2));
    /// ```
    pub fn merge<'a>(configs: impl IntoIterator<Item = &'a Self>) -> Self {
        configs
            .into_iter()
            .fold(Self::default(), |acc, config| acc.merge_with(config))
    }

    /// Parse a config from a JSON document.
    ///
    /// ```
    /// use querycond::{Operator, QueryConfig};
    ///
    /// let config = QueryConfig::from_json(
    ///     r#"{"whitelist": {"age": ["eq", "gt"]}, "blacklist": ["password"]}"#,
    /// ).unwrap();
    ///
    /// assert!(config.is_blacklisted("password"));
    /// assert!(config.allowed_operators("age").unwrap().contains(&Operator::Gt));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: JsonValue =
            miniserde::json::from_str(json).map_err(|_| ConfigError::InvalidJson)?;
        Self::from_json_value(&value)
    }

    /// Build a config from an already-parsed JSON value.
    pub fn from_json_value(value: &JsonValue) -> Result<Self, ConfigError> {
        let JsonValue::Object(root) = value else {
            return Err(ConfigError::ExpectedObject("$"));
        };

        let mut config = Self::new();

        if let Some(whitelist) = root.get("whitelist") {
            let JsonValue::Object(fields) = whitelist else {
                return Err(ConfigError::ExpectedObject("whitelist"));
            };
            for (field, ops) in fields {
                let ops = string_array(ops, field)?
                    .into_iter()
                    .map(|name| {
                        Operator::from_name(name).ok_or_else(|| ConfigError::UnknownOperator {
                            field: field.clone(),
                            operator: name.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                config = config.allow(field.clone(), &ops);
            }
        }

        if let Some(blacklist) = root.get("blacklist") {
            let fields = string_array(blacklist, "blacklist")?;
            config = config.deny(&fields);
        }

        Ok(config)
    }
}

fn string_array<'a>(value: &'a JsonValue, path: &str) -> Result<Vec<&'a str>, ConfigError> {
    let JsonValue::Array(items) = value else {
        return Err(ConfigError::ExpectedArray(path.to_string()));
    };
    items
        .iter()
        .map(|item| match item {
            JsonValue::String(s) => Ok(s.as_str()),
            _ => Err(ConfigError::ExpectedString(path.to_string())),
        })
        .collect()
}
