//! Error types returned while building and executing query plans.

use crate::Operator;
use thiserror::Error;

/// Boxed error raised by an execution collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while turning a request into a query plan, or while running it.
///
/// Every variant except [`ExecutionFailure`](Self::ExecutionFailure) is a
/// rejection of caller input and maps naturally to a `400` response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// Field name is empty or contains characters outside `[A-Za-z0-9_]`.
    #[error("unsafe identifier `{field}`")]
    UnsafeIdentifier {
        /// The rejected field name.
        field: String,
    },
    /// A filter fragment did not split into exactly one `field:value` pair.
    #[error("malformed `{operator}` filter `{fragment}`, expected `field:value`")]
    MalformedPair {
        /// The operator list the fragment came from.
        operator: Operator,
        /// The offending fragment.
        fragment: String,
    },
    /// Field is not in a non-empty whitelist.
    #[error("field `{field}` is not allowed")]
    FieldNotAllowed {
        /// The rejected field name.
        field: String,
    },
    /// Field is whitelisted but not for this operator.
    #[error("operator `{operator}` is not allowed for field `{field}`")]
    OperatorNotAllowed {
        /// The field the operator was used on.
        field: String,
        /// The rejected operator.
        operator: Operator,
    },
    /// Field is blacklisted.
    #[error("field `{field}` is blacklisted")]
    Blacklisted {
        /// The rejected field name.
        field: String,
    },
    /// A sort fragment did not split into exactly one `field:direction` pair.
    #[error("malformed sort `{fragment}`, expected `field:direction`")]
    MalformedSort {
        /// The offending fragment.
        fragment: String,
    },
    /// Sort direction is neither `ASC` nor `DESC`.
    #[error("invalid sort direction `{direction}` for field `{field}`, expected ASC or DESC")]
    InvalidSortDirection {
        /// The field being sorted.
        field: String,
        /// The rejected direction.
        direction: String,
    },
    /// The execution collaborator failed.
    #[error("{operation} failed: {source}")]
    ExecutionFailure {
        /// The collaborator verb that failed (`count` or `fetch`).
        operation: &'static str,
        /// The underlying error.
        #[source]
        source: BoxError,
    },
}

impl QueryError {
    /// Wrap a collaborator error with the operation that raised it.
    pub fn execution(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::ExecutionFailure {
            operation,
            source: source.into(),
        }
    }

    /// Whether this error rejects caller input rather than reporting a backend fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::ExecutionFailure { .. })
    }
}

/// Errors raised while loading a [`QueryConfig`](crate::QueryConfig) document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Invalid JSON syntax or encoding.
    #[error("invalid JSON syntax or encoding")]
    InvalidJson,
    /// Expected a JSON object.
    #[error("expected JSON object at `{0}`")]
    ExpectedObject(&'static str),
    /// Expected a JSON array.
    #[error("expected JSON array at `{0}`")]
    ExpectedArray(String),
    /// Expected a JSON string.
    #[error("expected JSON string in `{0}`")]
    ExpectedString(String),
    /// Operator name is not one of `eq, like, in, gt, gte, lt, lte`.
    #[error("unknown operator `{operator}` for field `{field}`")]
    UnknownOperator {
        /// The field the operator was listed under.
        field: String,
        /// The unrecognized operator name.
        operator: String,
    },
}
