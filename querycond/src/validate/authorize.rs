//! Field/operator authorization for user-provided filters.

use super::identifier::is_safe_identifier;
use crate::error::QueryError;
use crate::{Operator, QueryConfig};

/// Approve or reject a (field, operator) pair.
///
/// Checks, in order:
/// 1. The field is a non-empty safe identifier (always, config or not).
/// 2. Without a config, nothing else is checked.
/// 3. A blacklisted field is rejected, even if whitelisted.
/// 4. A non-empty whitelist must list the field, and the operator for it.
///
/// # Example
///
/// ```
/// use querycond::{authorize, Operator, QueryConfig, QueryError};
///
/// let config = QueryConfig::new()
///     .allow("age", &[Operator::Eq, Operator::Gt])
///     .deny(&["password"]);
///
/// assert!(authorize("age", Operator::Gt, Some(&config)).is_ok());
/// assert!(matches!(
///     authorize("age", Operator::Like, Some(&config)),
///     Err(QueryError::OperatorNotAllowed { .. })
/// ));
/// assert!(matches!(
///     authorize("password", Operator::Eq, Some(&config)),
///     Err(QueryError::Blacklisted { .. })
/// ));
/// ```
pub fn authorize(
    field: &str,
    operator: Operator,
    config: Option<&QueryConfig>,
) -> Result<(), QueryError> {
    if field.is_empty() || !is_safe_identifier(field) {
        return Err(QueryError::UnsafeIdentifier {
            field: field.to_string(),
        });
    }

    let Some(config) = config else {
        return Ok(());
    };

    if config.is_blacklisted(field) {
        return Err(QueryError::Blacklisted {
            field: field.to_string(),
        });
    }

    if config.is_open() {
        return Ok(());
    }

    match config.allowed_operators(field) {
        None => Err(QueryError::FieldNotAllowed {
            field: field.to_string(),
        }),
        Some(ops) if !ops.contains(&operator) => Err(QueryError::OperatorNotAllowed {
            field: field.to_string(),
            operator,
        }),
        Some(_) => Ok(()),
    }
}
