//! Identifier validation for SQL injection prevention.

/// Check that a string is a safe column/field identifier.
///
/// Every character must be an ASCII letter, digit, or underscore. This blocks
/// quotes, semicolons, comment markers, whitespace and non-ASCII look-alikes
/// from ever reaching an identifier position in generated SQL.
///
/// The empty string passes vacuously. Callers that accept field names from
/// requests must reject empty names themselves; [`authorize`](crate::authorize)
/// does.
///
/// # Examples
///
/// ```
/// use querycond::is_safe_identifier;
///
/// assert!(is_safe_identifier("user_id"));
/// assert!(is_safe_identifier("Table123"));
/// assert!(is_safe_identifier("1st_place"));
///
/// assert!(!is_safe_identifier("user-name"));
/// assert!(!is_safe_identifier("user.id"));
/// assert!(!is_safe_identifier("1;DROP TABLE x"));
/// ```
#[inline]
#[must_use]
pub fn is_safe_identifier(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Assert that a string is a non-empty safe identifier.
///
/// # Panics
///
/// Panics with a descriptive error if the identifier is invalid.
/// This is intended for programmer errors (invalid table/column names in code),
/// not for user input validation.
///
/// ```should_panic
/// use querycond::assert_safe_identifier;
///
/// assert_safe_identifier("users; DROP TABLE", "table"); // Panics!
/// ```
#[inline]
pub fn assert_safe_identifier(s: &str, context: &str) {
    assert!(
        !s.is_empty() && is_safe_identifier(s),
        "Invalid SQL {context} name '{s}': must be non-empty and contain only \
         ASCII alphanumeric/underscore"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_identifiers() {
        assert!(is_safe_identifier("users"));
        assert!(is_safe_identifier("user_id"));
        assert!(is_safe_identifier("_private"));
        assert!(is_safe_identifier("Table123"));
        assert!(is_safe_identifier("UPPERCASE"));
        assert!(is_safe_identifier("mixedCase"));
        // Leading digits are fine, only the character set matters
        assert!(is_safe_identifier("123abc"));
        assert!(is_safe_identifier("1"));
    }

    #[test]
    fn test_empty_identifier_passes_vacuously() {
        assert!(is_safe_identifier(""));
    }

    #[test]
    fn test_unsafe_identifiers() {
        assert!(!is_safe_identifier("user-name"));
        assert!(!is_safe_identifier("user.id"));
        assert!(!is_safe_identifier("user name"));
        assert!(!is_safe_identifier("user;drop"));
        assert!(!is_safe_identifier("table'"));
        assert!(!is_safe_identifier("table\""));
        assert!(!is_safe_identifier("table`"));
        assert!(!is_safe_identifier("table("));
        assert!(!is_safe_identifier("1;DROP TABLE x"));
        assert!(!is_safe_identifier("users--"));
        assert!(!is_safe_identifier("users/*comment*/"));
        assert!(!is_safe_identifier("1 OR 1=1"));
    }

    #[test]
    fn test_unicode_rejected() {
        assert!(!is_safe_identifier("users\u{0000}")); // Null byte
        assert!(!is_safe_identifier("users\u{200B}")); // Zero-width space
        assert!(!is_safe_identifier("usërs"));
        assert!(!is_safe_identifier("用户"));
        assert!(!is_safe_identifier("ｕｓｅｒｓ")); // Fullwidth letters
    }

    #[test]
    #[should_panic(expected = "Invalid SQL table name")]
    fn test_assert_safe_identifier_panics() {
        assert_safe_identifier("users; DROP TABLE", "table");
    }

    #[test]
    #[should_panic(expected = "Invalid SQL column name")]
    fn test_assert_safe_identifier_rejects_empty() {
        assert_safe_identifier("", "column");
    }
}
