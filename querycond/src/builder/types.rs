//! Core types for query conditions.

use std::fmt;

/// Filter operators accepted from requests.
///
/// Each operator corresponds to one raw list on
/// [`PageRequest`](crate::PageRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal: `=`
    Eq,
    /// Contains pattern: `LIKE '%value%'`
    Like,
    /// In set: `IN` or `= ANY`
    In,
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Gte,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Lte,
}

impl Operator {
    /// All operators, in the order conditions are built.
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Like,
        Self::In,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
    ];

    /// Lowercase name as used in config documents and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Like => "like",
            Self::In => "in",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }

    /// Parse an operator name, ignoring ASCII case.
    ///
    /// ```
    /// use querycond::Operator;
    ///
    /// assert_eq!(Operator::from_name("gte"), Some(Operator::Gte));
    /// assert_eq!(Operator::from_name("IN"), Some(Operator::In));
    /// assert_eq!(Operator::from_name("regex"), None);
    /// ```
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering comparisons handed to
/// [`ConditionSink::add_comparison`](crate::ConditionSink::add_comparison).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Greater than: `>`
    Gt,
    /// Greater than or equal: `>=`
    Gte,
    /// Less than: `<`
    Lt,
    /// Less than or equal: `<=`
    Lte,
}

impl CompareOp {
    /// SQL symbol for this comparison.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }
}

impl From<CompareOp> for Operator {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::Gt => Self::Gt,
            CompareOp::Gte => Self::Gte,
            CompareOp::Lt => Self::Lt,
            CompareOp::Lte => Self::Lte,
        }
    }
}

/// Inferred kind of a comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Base-10 integer.
    Numeric,
    /// Anything else, compared lexically.
    String,
}

/// A typed comparison value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    String(String),
}

impl Value {
    /// Infer a value from its raw text.
    ///
    /// Text that parses as a base-10 `i64` becomes [`Value::Int`]; everything
    /// else, including decimals like `"1.5"`, stays a string.
    ///
    /// ```
    /// use querycond::Value;
    ///
    /// assert_eq!(Value::infer("30"), Value::Int(30));
    /// assert_eq!(Value::infer("-7"), Value::Int(-7));
    /// assert_eq!(Value::infer("1.5"), Value::String("1.5".into()));
    /// assert_eq!(Value::infer("bob"), Value::String("bob".into()));
    /// ```
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        raw.parse::<i64>()
            .map_or_else(|_| Self::String(raw.to_string()), Self::Int)
    }

    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Numeric,
            Self::String(_) => ValueKind::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A resolved predicate. All conditions of a plan combine with `AND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `field = value`
    Equal { field: String, value: Value },
    /// `field <op> value`
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    /// `field LIKE pattern`, pattern already wrapped in `%`.
    Contains { field: String, pattern: String },
    /// `field IN (values...)`, literal strings.
    Membership { field: String, values: Vec<String> },
}

impl Condition {
    /// The field this condition tests.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Equal { field, .. }
            | Self::Compare { field, .. }
            | Self::Contains { field, .. }
            | Self::Membership { field, .. } => field,
        }
    }

    /// The request operator this condition came from.
    #[must_use]
    pub fn operator(&self) -> Operator {
        match self {
            Self::Equal { .. } => Operator::Eq,
            Self::Compare { op, .. } => (*op).into(),
            Self::Contains { .. } => Operator::Like,
            Self::Membership { .. } => Operator::In,
        }
    }

    /// Numeric only for equality/comparison against an integer value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Equal { value, .. } | Self::Compare { value, .. } => value.kind(),
            Self::Contains { .. } | Self::Membership { .. } => ValueKind::String,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort field with direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub dir: SortDir,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }
}
