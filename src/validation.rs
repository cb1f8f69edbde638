//! Validation helper functions for the todo service
//!
//! This module contains parsing logic for individual fields: status values,
//! deadline timestamps, titles and record ids. Each helper returns a
//! human-readable violation message so callers can collect every problem
//! with an input before reporting it.

use crate::todo::TodoStatus;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse and validate a status value
///
/// # Arguments
/// * `status_str` - Status string to parse (`pending`, `in-progress`, `completed`)
///
/// # Returns
/// The parsed status or a violation message
pub fn parse_status(status_str: &str) -> Result<TodoStatus, String> {
    status_str.trim().parse::<TodoStatus>()
}

/// Parse and validate a deadline timestamp
///
/// Accepts RFC 3339 timestamps (`2025-03-15T09:00:00Z`), naive date-times
/// (`2025-03-15T09:00:00`, read as UTC) and plain dates (`2025-03-15`, read
/// as midnight UTC).
///
/// # Arguments
/// * `deadline_str` - Timestamp string to parse
///
/// # Returns
/// The parsed UTC timestamp or a violation message
pub fn parse_deadline(deadline_str: &str) -> Result<DateTime<Utc>, String> {
    let s = deadline_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }

    Err(format!(
        "Invalid deadline '{}'. Use an ISO 8601 timestamp (e.g., '2025-03-15T09:00:00Z') or a date (e.g., '2025-03-15')",
        deadline_str
    ))
}

/// Validate a title and return it trimmed
///
/// # Returns
/// The trimmed title, or a violation message when it is blank
pub fn validate_title(title: &str) -> Result<String, String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err("Title is required and cannot be blank".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Normalize a record id by trimming surrounding whitespace
///
/// # Examples
/// ```
/// # use todo_service::validation::normalize_id;
/// assert_eq!(normalize_id("  abc-123 "), "abc-123");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}
