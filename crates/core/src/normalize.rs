//! Input normalization applied before storage and lookup.

/// Normalize an email address for storage and comparison.
///
/// Trims surrounding whitespace and lowercases the whole address so that
/// uniqueness checks and logins are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim a free-text field, returning `None` if nothing is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
