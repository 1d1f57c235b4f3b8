//! Field checks applied once, at the write boundary.

use chrono::{DateTime, Utc};
use url::Url;

use crate::{
    domain::{parse_timestamp, Category},
    errors::SubscriptionError,
};

pub use crate::domain::common::{require_text, validate_email};

pub fn validate_amount(amount: f64) -> Result<f64, SubscriptionError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(SubscriptionError::validation(
            "amount",
            "must be greater than zero",
        ))
    }
}

pub fn validate_notify_days(days: i64) -> Result<u32, SubscriptionError> {
    u32::try_from(days).map_err(|_| {
        SubscriptionError::validation("notify_days_before", "must be zero or a positive number")
    })
}

/// Normalizes a currency code to upper case; it is stored and displayed, never converted.
pub fn validate_currency(code: &str) -> Result<String, SubscriptionError> {
    let trimmed = code.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(SubscriptionError::validation(
            "currency",
            format!("`{code}` is not a three letter code"),
        ))
    }
}

pub fn validate_category(label: &str) -> Result<Category, SubscriptionError> {
    label.parse()
}

/// Accepts an absolute http(s) URL; blank input clears the website.
pub fn validate_website(raw: Option<String>) -> Result<Option<String>, SubscriptionError> {
    let Some(raw) = raw.map(|text| text.trim().to_string()) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(raw)),
        _ => Err(SubscriptionError::validation(
            "website",
            format!("`{raw}` is not a valid URL"),
        )),
    }
}

pub fn parse_date(field: &'static str, raw: Option<String>) -> Result<DateTime<Utc>, SubscriptionError> {
    let raw = raw.ok_or_else(|| SubscriptionError::missing(field))?;
    parse_timestamp(&raw)
}

pub fn validate_schedule(
    start_date: DateTime<Utc>,
    next_billing_date: DateTime<Utc>,
) -> Result<(), SubscriptionError> {
    if next_billing_date < start_date {
        return Err(SubscriptionError::validation(
            "next_billing_date",
            "must not be before the start date",
        ));
    }
    Ok(())
}
