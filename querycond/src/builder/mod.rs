//! Filter and sort parsing, and condition building.

mod condition;
mod parse;
mod sort;
mod types;

// Re-export all public items
pub use condition::build_conditions;
pub use parse::{parse_in_pairs, parse_pairs};
pub use sort::parse_sort;
pub use types::{CompareOp, Condition, Operator, SortDir, SortField, Value, ValueKind};
