//! Tests for date parsing utilities

use crate::app::cli::date_parser::*;
use chrono::{Datelike, Duration, Local, Timelike};

fn age(dt: chrono::DateTime<Local>) -> Duration {
    Local::now() - dt
}

#[test]
fn test_parse_iso_date() {
    let result = parse_date("2024-01-15").unwrap();
    assert_eq!((result.year(), result.month(), result.day()), (2024, 1, 15));
    assert_eq!((result.hour(), result.minute()), (0, 0));

    assert!(parse_date("2024-01-15T10:30:00Z").is_ok());
    assert!(parse_date("2024-01-15T10:30:00+02:00").is_ok());
}

#[test]
fn test_parse_relative_dates() {
    assert!(age(parse_date("now").unwrap()) < Duration::seconds(1));
    assert!(age(parse_date("today").unwrap()) < Duration::seconds(1));

    let yesterday = age(parse_date("yesterday").unwrap());
    assert!(yesterday > Duration::hours(23) && yesterday < Duration::hours(25));

    let week = age(parse_date("7 days ago").unwrap());
    assert!(week > Duration::days(6) && week < Duration::days(8));

    let weeks = age(parse_date("2 weeks ago").unwrap());
    assert!(weeks > Duration::days(13) && weeks < Duration::days(15));

    let compact = age(parse_date("3days ago").unwrap());
    assert!(compact > Duration::days(2) && compact < Duration::days(4));
}

#[test]
fn test_invalid_dates() {
    assert!(parse_date("invalid").is_err());
    assert!(parse_date("2024-13-01").is_err());
    assert!(parse_date("2024-01-32").is_err());
    assert!(parse_date("5 fortnights ago").is_err());
}

#[test]
fn test_since_day_count_without_ago() {
    let since = age(parse_since("5 days").unwrap());
    assert!(since > Duration::days(4) && since < Duration::days(6));
}

#[test]
fn test_since_unreadable_day_count_falls_back() {
    let since = age(parse_since("several days ago").unwrap());
    assert!(since >= Duration::days(DEFAULT_SINCE_DAYS));
    assert!(since < Duration::days(DEFAULT_SINCE_DAYS) + Duration::minutes(1));
}

#[test]
fn test_since_other_garbage_is_an_error() {
    assert!(parse_since("next month").is_err());
    assert!(parse_since("2024/01/01").is_err());
}

#[test]
fn test_huge_counts_are_errors_not_panics() {
    assert!(parse_date("99999999999 years ago").is_err());
    assert!(parse_date("9223372036854775807 months ago").is_err());
    assert!(parse_date("99999999999999weeks ago").is_err());

    assert!(parse_since("1000000000000 days").is_err());
    assert!(parse_since("1000000000000 days ago").is_err());
    assert!(parse_since("99999999999 years ago").is_err());
}
