//! Shared pre-flight validation helpers.
//!
//! Pure and synchronous. Each helper returns `Some(message)` on failure
//! and `None` when the check passes (or the value is absent), so checks
//! chain with `Option::or_else` — the first failing message wins and
//! later checks are not evaluated.

/// Validate a pagination limit against an inclusive range.
pub(crate) fn validate_limit(limit: Option<i64>, min: i64, max: i64) -> Option<String> {
    match limit {
        Some(value) if value < min || value > max => Some(format!(
            "The limit must be a number between {min} and {max}."
        )),
        _ => None,
    }
}

/// Validate a pagination offset.
pub(crate) fn validate_offset(offset: Option<i64>) -> Option<String> {
    match offset {
        Some(value) if value < 0 => {
            Some("The offset must be a number greater than or equal to 0.".into())
        }
        _ => None,
    }
}

/// Require a non-blank string field, with a fixed per-field message.
pub(crate) fn require(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}
