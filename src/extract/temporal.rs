//! Clock-time resolution: time-of-day capture, duration inference, and
//! end-time arithmetic.
//!
//! Supports:
//! - 12-hour times: "1pm", "7:30 AM", "11:05pm"
//! - Explicit durations: "for 2 hours", "for 45 min"
//! - End-time computation at hour and minute granularity with 24-hour
//!   wraparound

use regex::Regex;

use crate::error::ExtractError;

use super::types::{Meridiem, TimeOfDay};

/// The shared 12-hour time vocabulary: `<hour>[:<minute>] <AM|PM>`.
///
/// The hour is scanned as 1+ digits and not range-checked; minutes are
/// optional and default to 0.
pub const TIME_PATTERN: &str = r"(\d+):?(\d*)\s*([AaPp][Mm])";

// ============================================================================
// Time-of-day Resolver
// ============================================================================

/// Extract the first time-of-day occurrence from free text.
pub fn resolve_time_of_day(text: &str) -> Option<TimeOfDay> {
    let pattern = Regex::new(TIME_PATTERN).expect("Invalid regex");
    let cap = pattern.captures(text)?;

    let hour = cap[1].parse::<u32>().ok()?;
    let minute = match cap[2].is_empty() {
        true => 0,
        false => cap[2].parse::<u32>().ok()?,
    };
    let meridiem = Meridiem::parse(&cap[3])?;

    Some(TimeOfDay::new(hour, minute, meridiem))
}

// ============================================================================
// Duration Resolver
// ============================================================================

/// Extract an explicit whole-hour duration ("for 2 hours"), defaulting to
/// one hour when absent. Used by the direct-parse path.
pub fn resolve_duration_hours(text: &str) -> i64 {
    let pattern = Regex::new(r"(?i)for\s+(\d+)\s+hour").expect("Invalid regex");
    pattern
        .captures(text)
        .and_then(|cap| cap[1].parse::<i64>().ok())
        .unwrap_or(1)
}

/// Extract an explicit duration in minutes ("for 90 minutes", "for 2 hrs"),
/// defaulting to 60 when absent. Hour units are converted to minutes. Used
/// by the external-hint normalization path.
pub fn resolve_duration_minutes(text: &str) -> i64 {
    let pattern = Regex::new(r"(?i)for\s+(\d+)\s+(hour|hr|minute|min)s?").expect("Invalid regex");
    match pattern.captures(text) {
        Some(cap) => {
            let Ok(value) = cap[1].parse::<i64>() else {
                return 60;
            };
            match cap[2].to_ascii_lowercase().as_str() {
                "hour" | "hr" => value * 60,
                _ => value,
            }
        }
        None => 60,
    }
}

// ============================================================================
// End-time Calculator
// ============================================================================

/// Convert a 24-hour clock hour to its 12-hour rendering.
pub fn from_24h(hour: u32, minute: u32) -> TimeOfDay {
    if hour >= 12 {
        let display = if hour > 12 { hour - 12 } else { 12 };
        TimeOfDay::new(display, minute, Meridiem::Pm)
    } else {
        let display = if hour == 0 { 12 } else { hour };
        TimeOfDay::new(display, minute, Meridiem::Am)
    }
}

/// Hour shift on the 24-hour scale. PM adds 12 unless the hour is already
/// 12; 12 AM becomes 0. Hours outside 1-12 pass through untouched.
fn to_24h(time: TimeOfDay) -> i64 {
    let mut hour = time.hour as i64;
    match time.meridiem {
        Meridiem::Pm if time.hour < 12 => hour += 12,
        Meridiem::Am if time.hour == 12 => hour = 0,
        _ => {}
    }
    hour
}

/// Compute the end time for a start time plus a whole-hour duration,
/// wrapping across midnight. The minute is carried through unchanged.
pub fn end_after_hours(start: TimeOfDay, duration_hours: i64) -> TimeOfDay {
    let end_hour = (to_24h(start) + duration_hours).rem_euclid(24);
    from_24h(end_hour as u32, start.minute)
}

/// Compute the end time for a rendered `H:MM AM|PM` start plus a duration
/// in minutes.
///
/// A start string that fails to parse is a loud [`ExtractError::MalformedTime`]:
/// the string comes from an upstream resolver, so a parse failure is a
/// defect, not bad user input.
pub fn end_after_minutes(start: &str, duration_minutes: i64) -> Result<TimeOfDay, ExtractError> {
    let parsed = parse_rendered_time(start)?;
    let total =
        (to_24h(parsed) * 60 + parsed.minute as i64 + duration_minutes).rem_euclid(24 * 60);
    Ok(from_24h((total / 60) as u32, (total % 60) as u32))
}

/// Parse a rendered 12-hour time string back into its parts.
fn parse_rendered_time(s: &str) -> Result<TimeOfDay, ExtractError> {
    let pattern =
        Regex::new(r"(?i)^\s*(\d+)(?::(\d{1,2}))?\s*(am|pm)\s*$").expect("Invalid regex");
    let cap = pattern
        .captures(s)
        .ok_or_else(|| ExtractError::MalformedTime(s.to_string()))?;

    let hour = cap[1]
        .parse::<u32>()
        .map_err(|_| ExtractError::MalformedTime(s.to_string()))?;
    let minute = match cap.get(2) {
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .map_err(|_| ExtractError::MalformedTime(s.to_string()))?,
        None => 0,
    };
    let meridiem =
        Meridiem::parse(&cap[3]).ok_or_else(|| ExtractError::MalformedTime(s.to_string()))?;

    Ok(TimeOfDay::new(hour, minute, meridiem))
}
