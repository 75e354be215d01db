//! Due date parsing.
//!
//! Dates are absolute UTC instants. A bare calendar date means midnight UTC of
//! that day; timestamps with an offset are converted to UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{LedgerError, Result};

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` (UTC), or RFC 3339.
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse a required due date, reporting failures against `field`.
pub fn require_due_date(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    if raw.trim().is_empty() {
        return Err(LedgerError::validation(field, format!("{field} is required")));
    }

    parse_due_date(raw).ok_or_else(|| {
        LedgerError::validation(field, format!("{field} `{}` is not a valid date", raw.trim()))
    })
}
