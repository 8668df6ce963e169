//! Identifier and authorization checks for user-provided field names.
//!
//! Field names end up in identifier positions of generated SQL, where they
//! cannot be parameterized, so every name from a request passes through
//! [`authorize`] before a predicate or sort is built from it.

mod authorize;
mod identifier;

pub use authorize::authorize;
pub use identifier::{assert_safe_identifier, is_safe_identifier};
