//! Client-side checks that run before any request is issued.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{CoreError, Result};

/// Trimmed, non-empty patient identifier
pub fn require_patient_id(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("Patient ID required"));
    }
    Ok(trimmed.to_string())
}

pub fn require_min_chars(value: &str, min: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(CoreError::validation(format!(
            "Enter at least {} characters",
            min
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_email(value: &str) -> Result<String> {
    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && domain.contains('.')
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::validation("Enter a valid email"));
    }
    Ok(trimmed.to_string())
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC); must lie after `now`.
pub fn parse_expiry(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
        .ok_or_else(|| CoreError::validation("Enter an expiry date (YYYY-MM-DD)"))?;

    if parsed <= now {
        return Err(CoreError::validation("Expiry must be in the future"));
    }
    Ok(parsed)
}

/// `YYYY-MM-DD`, not after `today`
pub fn validate_dob(value: &str, today: NaiveDate) -> Result<String> {
    let trimmed = value.trim();
    let dob = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CoreError::validation("Enter date of birth as YYYY-MM-DD"))?;
    if dob > today {
        return Err(CoreError::validation("Date of birth cannot be in the future"));
    }
    Ok(dob.format("%Y-%m-%d").to_string())
}
