//! Date parsing utilities
//!
//! Provides flexible date parsing supporting ISO 8601 formats and relative dates.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

/// Window used when `--since` is absent or a day count cannot be read
pub const DEFAULT_SINCE_DAYS: i64 = 7;
pub const DEFAULT_SINCE: &str = "7 days ago";

/// Parse a date string into a local timestamp
///
/// Supports:
/// - ISO 8601 dates: "2024-01-15", "2024-01-15T10:30:00Z"
/// - Relative past dates: "yesterday", "1 week ago", "2 months ago"
pub fn parse_date(date_str: &str) -> Result<DateTime<Local>, String> {
    let trimmed = date_str.trim();

    if let Ok(dt) = parse_iso_date(trimmed) {
        return Ok(dt);
    }

    if let Ok(dt) = parse_relative_date(trimmed) {
        return Ok(dt);
    }

    Err(format!(
        "Invalid date format: '{}'. Expected ISO 8601 (YYYY-MM-DD) or relative (e.g., 'yesterday', '7 days ago')",
        date_str
    ))
}

/// Parse the `--since` option.
///
/// Anything mentioning days whose count cannot be read falls back to the
/// default window with a warning; other unreadable input is an error.
pub fn parse_since(value: &str) -> Result<DateTime<Local>, String> {
    if let Ok(dt) = parse_date(value) {
        return Ok(dt);
    }

    let lower = value.trim().to_lowercase();
    if lower.contains("day") {
        // "5 days" without "ago" is still a day count
        if let Some(days) = lower
            .split_whitespace()
            .next()
            .and_then(|first| first.parse::<i64>().ok())
        {
            return Duration::try_days(days)
                .ok_or_else(|| out_of_range(value))
                .and_then(|window| days_before_now(window, value));
        }
        log::warn!(
            "Could not parse date '{}'. Using default ({} days).",
            value,
            DEFAULT_SINCE_DAYS
        );
        return Ok(Local::now() - Duration::days(DEFAULT_SINCE_DAYS));
    }

    Err(format!(
        "Invalid date format '{}'. Use YYYY-MM-DD or 'N days ago'.",
        value
    ))
}

fn out_of_range(value: &str) -> String {
    format!("Date '{}' is out of range", value)
}

fn days_before_now(window: Duration, value: &str) -> Result<DateTime<Local>, String> {
    Local::now()
        .checked_sub_signed(window)
        .ok_or_else(|| out_of_range(value))
}

/// Parse an ISO 8601 date string
fn parse_iso_date(date_str: &str) -> Result<DateTime<Local>, String> {
    // Try full datetime first
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.with_timezone(&Local));
    }

    // Try just date (YYYY-MM-DD), local midnight
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| "Invalid time".to_string())?;
        return Local
            .from_local_datetime(&datetime)
            .earliest()
            .ok_or_else(|| "Ambiguous or invalid local time".to_string());
    }

    Err("Not an ISO date".to_string())
}

/// Parse a relative date string
fn parse_relative_date(date_str: &str) -> Result<DateTime<Local>, String> {
    let lower = date_str.to_lowercase();
    let now = Local::now();

    match lower.as_str() {
        "now" | "today" => return Ok(now),
        "yesterday" => return Ok(now - Duration::days(1)),
        _ => {}
    }

    // "N unit ago"
    let parts: Vec<&str> = lower.split_whitespace().collect();
    if parts.len() >= 2 && parts.last() == Some(&"ago") {
        let unit = if parts.len() == 3 {
            parts[1]
        } else if parts.len() == 2 {
            // Handle cases like "1week ago" without space
            let combined = parts[0];
            match combined.char_indices().find(|(_, c)| c.is_alphabetic()) {
                Some((idx, _)) => {
                    let count = combined[..idx]
                        .parse::<i64>()
                        .map_err(|_| format!("Invalid number in relative date: '{}'", combined))?;
                    let window = parse_time_unit(&combined[idx..], count)?;
                    return now.checked_sub_signed(window).ok_or_else(|| out_of_range(date_str));
                }
                None => return Err("Invalid relative date format".to_string()),
            }
        } else {
            return Err("Invalid relative date format".to_string());
        };

        let count = parts[0]
            .parse::<i64>()
            .map_err(|_| format!("Invalid number in relative date: '{}'", parts[0]))?;
        let window = parse_time_unit(unit, count)?;
        return now.checked_sub_signed(window).ok_or_else(|| out_of_range(date_str));
    }

    Err("Not a recognized relative date format".to_string())
}

/// Parse a time unit string and count into a chrono Duration
fn parse_time_unit(unit: &str, count: i64) -> Result<Duration, String> {
    let window = match unit {
        "second" | "seconds" | "sec" | "secs" | "s" => Duration::try_seconds(count),
        "minute" | "minutes" | "min" | "mins" | "m" => Duration::try_minutes(count),
        "hour" | "hours" | "hr" | "hrs" | "h" => Duration::try_hours(count),
        "day" | "days" | "d" => Duration::try_days(count),
        "week" | "weeks" | "w" => Duration::try_weeks(count),
        // Approximate
        "month" | "months" => count.checked_mul(30).and_then(Duration::try_days),
        "year" | "years" | "y" => count.checked_mul(365).and_then(Duration::try_days),
        _ => return Err(format!("Unknown time unit: '{}'", unit)),
    };
    window.ok_or_else(|| format!("Relative date out of range: {} {}", count, unit))
}
