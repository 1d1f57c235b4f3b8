use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubscriptionError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Returns the trimmed text, or a missing-field error when absent or blank.
pub fn require_text(field: &'static str, value: Option<String>) -> Result<String, SubscriptionError> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| SubscriptionError::missing(field))
}

pub fn validate_email(email: &str) -> Result<(), SubscriptionError> {
    if EMAIL_PATTERN.is_match(email.trim()) {
        Ok(())
    } else {
        Err(SubscriptionError::validation(
            "email",
            format!("`{email}` is not a valid email address"),
        ))
    }
}

/// Parses a boundary timestamp.
///
/// Accepts RFC 3339 (`2026-10-16T09:30:00Z`), a naive `YYYY-MM-DDTHH:MM:SS` read as UTC, or a
/// bare `YYYY-MM-DD` which maps to midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SubscriptionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubscriptionError::InvalidDate("empty timestamp".into()));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| SubscriptionError::InvalidDate(format!("`{trimmed}` is not a timestamp")))
}

/// Rounds to two decimal places, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
