//! Calendar-date resolution from natural-language phrases.
//!
//! Maps relative and absolute date phrases to a concrete date against an
//! injectable reference "now", supporting:
//! - Literals: "today", "tomorrow", "next week"
//! - Weekday names: "friday", "thurs", "next monday"
//! - Month-day phrases: "May 20", "feb 3rd"
//! - Numeric dates: "6/11", "6-11-25", "2025-06-11"
//!
//! Rules are tried in a fixed priority order; a candidate whose
//! day-of-month fails range validation (leap years included) causes that
//! rule to be skipped rather than aborting resolution, and an unmatched
//! prompt defaults to tomorrow.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use regex::Regex;
use tracing::debug;

use crate::error::ExtractError;

/// Weekday vocabulary: full names and standard abbreviations, scanned in
/// this order.
const WEEKDAYS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
];

/// Month vocabulary: full names and standard abbreviations, scanned in
/// this order.
const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sep", 9),
    ("sept", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

/// Resolver for date phrases, relative to an injectable reference date.
pub struct DateResolver {
    /// Reference date for relative calculations (defaults to today).
    reference_date: NaiveDate,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateResolver {
    /// Create a resolver with today as the reference date.
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
        }
    }

    /// Create a resolver with a specific reference date.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// Resolve free text to a calendar date using the first matching rule:
    ///
    /// 1. "today"
    /// 2. "tomorrow"
    /// 3. "next week" (reference + 7)
    /// 4. "next <weekday>" (one cycle beyond the plain weekday match)
    /// 5. a bare weekday name, never resolving to the reference day itself
    /// 6. "<month> <day>", rolling to next year when already past
    /// 7. numeric M/D with optional 2- or 4-digit year
    /// 8. numeric YYYY-M-D
    /// 9. default: tomorrow
    ///
    /// The anchored "next <weekday>" phrase is tested before the bare
    /// weekday scan so "next monday" lands a full cycle later than
    /// "monday".
    pub fn resolve(&self, text: &str) -> NaiveDate {
        let lower = text.to_lowercase();

        if lower.contains("today") {
            return self.reference_date;
        }
        if lower.contains("tomorrow") {
            return self.reference_date + Duration::days(1);
        }
        if lower.contains("next week") {
            return self.reference_date + Duration::days(7);
        }
        if let Some(date) = self.resolve_next_weekday(&lower) {
            return date;
        }
        if let Some(date) = self.resolve_weekday(&lower) {
            return date;
        }
        if let Some(date) = self.resolve_month_day(&lower) {
            return date;
        }
        if let Some(date) = self.resolve_numeric(text) {
            return date;
        }
        if let Some(date) = self.resolve_iso(text) {
            return date;
        }

        self.reference_date + Duration::days(1)
    }

    /// Days until the next occurrence of `target`, strictly after the
    /// reference date: the same weekday rolls a full week forward.
    fn days_until(&self, target: Weekday) -> i64 {
        let current = self.reference_date.weekday().num_days_from_monday() as i64;
        let wanted = target.num_days_from_monday() as i64;
        let diff = (wanted - current).rem_euclid(7);
        if diff == 0 {
            7
        } else {
            diff
        }
    }

    /// "next <weekday>": the plain next occurrence plus an additional week.
    fn resolve_next_weekday(&self, lower: &str) -> Option<NaiveDate> {
        let pattern = Regex::new(
            r"next\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues|tue|wed|thurs|thu|fri|sat|sun)\b",
        )
        .expect("Invalid regex");
        let cap = pattern.captures(lower)?;
        let name = cap.get(1)?.as_str();
        let (_, weekday) = WEEKDAYS.iter().find(|(n, _)| *n == name)?;
        Some(self.reference_date + Duration::days(self.days_until(*weekday) + 7))
    }

    /// A bare weekday name or abbreviation appearing anywhere.
    fn resolve_weekday(&self, lower: &str) -> Option<NaiveDate> {
        for (name, weekday) in WEEKDAYS {
            let pattern = Regex::new(&format!(r"\b{}\b", name)).expect("Invalid regex");
            if pattern.is_match(lower) {
                return Some(self.reference_date + Duration::days(self.days_until(*weekday)));
            }
        }
        None
    }

    /// "<month> <day>" with an optional ordinal suffix, in the current
    /// year, rolling to next year when the date is strictly before the
    /// reference.
    fn resolve_month_day(&self, lower: &str) -> Option<NaiveDate> {
        for (name, month) in MONTHS {
            let pattern = Regex::new(&format!(r"\b{}\s+(\d{{1,2}})(?:st|nd|rd|th)?\b", name))
                .expect("Invalid regex");
            let Some(cap) = pattern.captures(lower) else {
                continue;
            };
            let day = cap[1].parse::<u32>().ok()?;

            let mut year = self.reference_date.year();
            if *month < self.reference_date.month()
                || (*month == self.reference_date.month() && day < self.reference_date.day())
            {
                year += 1;
            }

            match calendar_date(year, *month, day) {
                Ok(date) => return Some(date),
                Err(e) => {
                    debug!("skipping month-day rule: {e}");
                    continue;
                }
            }
        }
        None
    }

    /// Numeric `M/D` or `M-D`, optionally followed by a 2- or 4-digit
    /// year. Only the first textual match is considered; an out-of-range
    /// candidate skips the rule.
    fn resolve_numeric(&self, text: &str) -> Option<NaiveDate> {
        let pattern =
            Regex::new(r"(\d{1,2})[/-](\d{1,2})(?:[/-](\d{2,4}))?").expect("Invalid regex");
        let cap = pattern.captures(text)?;

        let month = cap[1].parse::<u32>().ok()?;
        let day = cap[2].parse::<u32>().ok()?;
        let year = match cap.get(3) {
            Some(m) if m.as_str().len() == 2 => 2000 + m.as_str().parse::<i32>().ok()?,
            Some(m) => m.as_str().parse::<i32>().ok()?,
            None => self.reference_date.year(),
        };

        match calendar_date(year, month, day) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("skipping numeric rule: {e}");
                None
            }
        }
    }

    /// Numeric `YYYY-M-D` or `YYYY/M/D`.
    fn resolve_iso(&self, text: &str) -> Option<NaiveDate> {
        let pattern = Regex::new(r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})").expect("Invalid regex");
        let cap = pattern.captures(text)?;

        let year = cap[1].parse::<i32>().ok()?;
        let month = cap[2].parse::<u32>().ok()?;
        let day = cap[3].parse::<u32>().ok()?;
        match calendar_date(year, month, day) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("skipping ISO rule: {e}");
                None
            }
        }
    }
}

/// Range-check a candidate date, leap years included.
fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ExtractError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ExtractError::InvalidDate { year, month, day })
}
