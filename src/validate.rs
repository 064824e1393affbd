//! Field checks shared by the create shapes.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Required text fields reject empty and whitespace-only values.
pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

/// Syntactic email check: local part, `@`, dotted domain, no whitespace.
pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if !email_re().is_match(value) {
        return Err(ValidationError::InvalidEmail {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Amounts land in a DECIMAL(10,2) column; NaN, infinities and negative
/// values are rejected here rather than stored.
pub fn amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::Malformed {
            field,
            reason: format!("must be a non-negative amount, got {value}"),
        });
    }
    Ok(())
}
