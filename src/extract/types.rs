//! Core types for task extraction.
//!
//! This module defines the task record returned to callers plus the
//! intermediate values that flow through the resolvers: clock times,
//! activity bindings, and the loosely-structured hint an external
//! analyzer may supply.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Clock Time Types
// ============================================================================

/// AM/PM designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Parse a designator, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// A wall-clock time on the 12-hour scale.
///
/// The hour is captured from text as one or more digits and is NOT
/// constrained to 1-12 here; out-of-range values are rendered literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl TimeOfDay {
    /// Create a new time-of-day value.
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// 12:00 PM, the default start when no time can be resolved.
    pub const NOON: TimeOfDay = TimeOfDay {
        hour: 12,
        minute: 0,
        meridiem: Meridiem::Pm,
    };
}

impl fmt::Display for TimeOfDay {
    /// Renders `H:MM AM|PM`: hour unpadded, minute zero-padded, meridiem
    /// uppercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

// ============================================================================
// Activity Matching Types
// ============================================================================

/// The kind of activity a recognizer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Lunch,
    Gym,
    Class,
    Meeting,
    Appointment,
    Generic,
}

/// The binding produced by one successful recognizer attempt: an activity
/// label and the start time it captured.
#[derive(Debug, Clone)]
pub struct ActivityMatch {
    /// Which recognizer fired.
    pub kind: ActivityKind,
    /// Human-readable task label (e.g. "Lunch with Sam").
    pub label: String,
    /// Captured start time.
    pub start: TimeOfDay,
}

// ============================================================================
// Task
// ============================================================================

/// A structured calendar task, the unit returned to callers.
///
/// Immutable once constructed; produced fresh per request. Equality is
/// structural. All four fields are always populated with syntactically
/// valid values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task name, never empty.
    pub name: String,
    /// Start time in `H:MM AM|PM` form.
    pub start_time: String,
    /// End time in `H:MM AM|PM` form.
    pub end_time: String,
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
}

impl Task {
    /// Build a task from resolved parts, rendering times and date into
    /// their wire formats.
    pub fn new(name: impl Into<String>, start: TimeOfDay, end: TimeOfDay, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

// ============================================================================
// External Hint
// ============================================================================

/// A loosely-structured extraction result from an external analyzer.
///
/// Every field is optional and the whole value is untrusted: the
/// normalizer validates each field and falls back to prompt-derived
/// values for anything missing or malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalHint {
    /// Name or title of the event.
    #[serde(default)]
    pub event_name: Option<String>,
    /// Date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub date: Option<String>,
    /// Start time in 24-hour `HH:MM` form.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Duration in minutes. Analyzers sometimes emit the bare `duration`
    /// key instead.
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<i64>,
}

impl ExternalHint {
    /// Whether the hint names an event at all. A blank name counts as
    /// absent.
    pub fn has_event_name(&self) -> bool {
        self.event_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_rendering() {
        let t = TimeOfDay::new(1, 0, Meridiem::Pm);
        assert_eq!(t.to_string(), "1:00 PM");

        let t = TimeOfDay::new(11, 5, Meridiem::Am);
        assert_eq!(t.to_string(), "11:05 AM");
    }

    #[test]
    fn test_noon_default() {
        assert_eq!(TimeOfDay::NOON.to_string(), "12:00 PM");
    }

    #[test]
    fn test_meridiem_parse() {
        assert_eq!(Meridiem::parse("pm"), Some(Meridiem::Pm));
        assert_eq!(Meridiem::parse("AM"), Some(Meridiem::Am));
        assert_eq!(Meridiem::parse("noonish"), None);
    }

    #[test]
    fn test_task_wire_format() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let task = Task::new(
            "Lunch with Sam",
            TimeOfDay::new(1, 0, Meridiem::Pm),
            TimeOfDay::new(2, 0, Meridiem::Pm),
            date,
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["name"], "Lunch with Sam");
        assert_eq!(json["start_time"], "1:00 PM");
        assert_eq!(json["end_time"], "2:00 PM");
        assert_eq!(json["date"], "2025-06-11");
    }

    #[test]
    fn test_hint_accepts_nulls_and_alias() {
        let hint: ExternalHint = serde_json::from_str(
            r#"{"event_name": null, "start_time": "13:00", "duration": 90}"#,
        )
        .unwrap();
        assert!(!hint.has_event_name());
        assert_eq!(hint.start_time.as_deref(), Some("13:00"));
        assert_eq!(hint.duration_minutes, Some(90));
    }

    #[test]
    fn test_blank_event_name_counts_as_absent() {
        let hint = ExternalHint {
            event_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!hint.has_event_name());
    }
}
