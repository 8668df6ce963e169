//! Condition building with numeric/string type inference.

use super::parse::{parse_in_pairs, parse_pairs};
use super::types::{CompareOp, Condition, Value};
use crate::error::QueryError;
use crate::validate::authorize;
use crate::{Operator, PageRequest, QueryConfig};
use std::collections::HashSet;

impl Condition {
    /// Build the condition for one parsed `field:value` pair.
    ///
    /// | Operator                  | Condition                                   |
    /// |---------------------------|---------------------------------------------|
    /// | `eq`                      | `Equal`, numeric if the value is an integer |
    /// | `gt`, `gte`, `lt`, `lte`  | `Compare`, numeric if the value is an integer |
    /// | `like`                    | `Contains` with `%value%`, never numeric    |
    /// | `in`                      | `Membership` over this one literal string   |
    ///
    /// The field is taken as given; authorize it first.
    ///
    /// Requests do not build `in` conditions here: [`build_conditions`] groups
    /// every `in` entry by field with [`parse_in_pairs`](crate::parse_in_pairs)
    /// and emits one `Membership` per field over all its values. `from_raw`
    /// with [`Operator::In`] matches that only when the field has one value.
    ///
    /// ```
    /// use querycond::{Condition, Operator, Value};
    ///
    /// assert_eq!(
    ///     Condition::from_raw(Operator::Eq, "age", "30"),
    ///     Condition::Equal { field: "age".into(), value: Value::Int(30) },
    /// );
    /// assert_eq!(
    ///     Condition::from_raw(Operator::Like, "name", "30"),
    ///     Condition::Contains { field: "name".into(), pattern: "%30%".into() },
    /// );
    /// ```
    pub fn from_raw(operator: Operator, field: impl Into<String>, raw: &str) -> Self {
        let field = field.into();
        let op = match operator {
            Operator::Eq => {
                return Self::Equal {
                    field,
                    value: Value::infer(raw),
                };
            },
            Operator::Like => {
                return Self::Contains {
                    field,
                    pattern: format!("%{raw}%"),
                };
            },
            Operator::In => {
                return Self::Membership {
                    field,
                    values: vec![raw.to_string()],
                };
            },
            Operator::Gt => CompareOp::Gt,
            Operator::Gte => CompareOp::Gte,
            Operator::Lt => CompareOp::Lt,
            Operator::Lte => CompareOp::Lte,
        };
        Self::Compare {
            field,
            op,
            value: Value::infer(raw),
        }
    }
}

/// Build every condition of a request, in operator order
/// `eq, like, in, gt, gte, lt, lte`.
///
/// Each raw entry of a single-valued operator contributes its own conditions,
/// so `gt=["age:18"]` plus `lt=["age:65"]` yields a range. The `in` list
/// collapses into one membership condition per field.
///
/// Each (field, operator) pair is authorized once before any condition of
/// that operator is built. The first failure aborts the whole pass.
///
/// # Example
///
/// ```
/// use querycond::{build_conditions, Operator, PageRequest, QueryConfig, QueryError};
///
/// let req = PageRequest::new()
///     .filter(Operator::Gt, "age:18")
///     .filter(Operator::Lt, "age:65");
/// let conditions = build_conditions(&req, None).unwrap();
/// assert_eq!(conditions.len(), 2);
///
/// let config = QueryConfig::new().allow("age", &[Operator::Gt]);
/// assert!(matches!(
///     build_conditions(&req, Some(&config)),
///     Err(QueryError::OperatorNotAllowed { .. })
/// ));
/// ```
pub fn build_conditions(
    req: &PageRequest,
    config: Option<&QueryConfig>,
) -> Result<Vec<Condition>, QueryError> {
    let mut conditions = Vec::new();
    for operator in Operator::ALL {
        let raws = req.raw(operator);
        if raws.is_empty() {
            continue;
        }
        match operator {
            Operator::In => build_membership(raws, config, &mut conditions)?,
            _ => build_single_valued(operator, raws, config, &mut conditions)?,
        }
    }
    Ok(conditions)
}

fn build_single_valued(
    operator: Operator,
    raws: &[String],
    config: Option<&QueryConfig>,
    out: &mut Vec<Condition>,
) -> Result<(), QueryError> {
    let parsed = raws
        .iter()
        .map(|raw| parse_pairs(operator, raw))
        .collect::<Result<Vec<_>, _>>()?;

    {
        let mut authorized = HashSet::new();
        for field in parsed.iter().flat_map(|pairs| pairs.keys()) {
            if authorized.insert(field.as_str()) {
                authorize(field, operator, config)?;
            }
        }
    }

    for pairs in parsed {
        for (field, value) in pairs {
            out.push(Condition::from_raw(operator, field, &value));
        }
    }
    Ok(())
}

fn build_membership(
    raws: &[String],
    config: Option<&QueryConfig>,
    out: &mut Vec<Condition>,
) -> Result<(), QueryError> {
    let sets = parse_in_pairs(raws)?;
    for field in sets.keys() {
        authorize(field, Operator::In, config)?;
    }
    out.extend(
        sets.into_iter()
            .map(|(field, values)| Condition::Membership { field, values }),
    );
    Ok(())
}
