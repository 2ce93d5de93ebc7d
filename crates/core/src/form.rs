//! Helpers for admin form input.

use crate::error::{DomainError, DomainResult};

/// Trimmed text, or `None` when blank. Optional form fields are stored as null.
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Trimmed text that must not be blank.
pub fn required(value: &str, field: &str) -> DomainResult<String> {
    non_blank(value).ok_or_else(|| DomainError::validation(format!("{field} is required")))
}

/// Non-negative whole number typed as text; blank means zero.
pub fn parse_count(value: &str, field: &str) -> DomainResult<u64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::validation(format!("{field} must be a whole number: {value}")));
    }
    value
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} is too large: {value}")))
}
