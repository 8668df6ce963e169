//! Raw filter parsing.
//!
//! Request decoders hand over each operator's filters as a list of raw
//! strings. Every raw string holds one or more comma-separated `field:value`
//! fragments:
//!
//! | Raw list                          | Parsed                        |
//! |-----------------------------------|-------------------------------|
//! | `eq=["age:30"]`                   | `{age: "30"}`                 |
//! | `eq=["age:30,name:bob"]`          | `{age: "30", name: "bob"}`    |
//! | `eq=["age:30,age:31"]`            | `{age: "31"}` (last wins)     |
//! | `in=["status:a,status:b", "status:c"]` | `{status: [a, b, c]}`    |
//!
//! Field names are not validated here; that is [`authorize`](crate::authorize)'s job.

use crate::error::QueryError;
use crate::Operator;
use indexmap::IndexMap;

/// Parse one raw string for a single-valued operator (`eq`, `like`, `gt`, ...).
///
/// A field repeated within the string keeps its last value. Every fragment,
/// including a blank string, must be a `field:value` pair.
///
/// # Example
///
/// ```
/// use querycond::{parse_pairs, Operator};
///
/// let pairs = parse_pairs(Operator::Eq, " age:30 , name:bob ").unwrap();
/// assert_eq!(pairs["age"], "30");
/// assert_eq!(pairs["name"], "bob");
///
/// assert!(parse_pairs(Operator::Eq, "age").is_err());
/// assert!(parse_pairs(Operator::Eq, "time:12:30").is_err());
/// ```
pub fn parse_pairs(operator: Operator, raw: &str) -> Result<IndexMap<String, String>, QueryError> {
    let mut pairs = IndexMap::new();
    for fragment in raw.split(',') {
        let (field, value) = split_pair(operator, fragment)?;
        pairs.insert(field.to_string(), value.to_string());
    }
    Ok(pairs)
}

/// Parse every raw string of the `in` list into field to value-set.
///
/// Values for the same field accumulate across fragments and across raw
/// strings, in first-seen order and without duplicates.
///
/// # Example
///
/// ```
/// use querycond::parse_in_pairs;
///
/// let sets = parse_in_pairs(["status:a,status:b", "status:c"]).unwrap();
/// assert_eq!(sets["status"], vec!["a", "b", "c"]);
/// ```
pub fn parse_in_pairs<I>(raws: I) -> Result<IndexMap<String, Vec<String>>, QueryError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut sets: IndexMap<String, Vec<String>> = IndexMap::new();
    for raw in raws {
        for fragment in raw.as_ref().split(',') {
            let (field, value) = split_pair(Operator::In, fragment)?;
            let values = sets.entry(field.to_string()).or_default();
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
    }
    Ok(sets)
}

/// Split a fragment into exactly one trimmed `field:value` pair.
fn split_pair(operator: Operator, fragment: &str) -> Result<(&str, &str), QueryError> {
    let malformed = || QueryError::MalformedPair {
        operator,
        fragment: fragment.trim().to_string(),
    };
    let (field, value) = fragment.split_once(':').ok_or_else(malformed)?;
    if value.contains(':') {
        return Err(malformed());
    }
    Ok((field.trim(), value.trim()))
}
