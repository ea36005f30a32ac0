//! Normalization of external analyzer hints into tasks.
//!
//! An [`ExternalHint`] is untrusted and partially absent; the normalizer
//! validates each field and falls back to prompt-derived values, producing
//! at most one task. Zero tasks is a normal, non-exceptional outcome that
//! callers treat as "try the next fallback tier".

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use super::date::DateResolver;
use super::temporal::{end_after_minutes, from_24h, resolve_time_of_day};
use super::types::{ExternalHint, Task, TimeOfDay};

/// Converts analyzer hints into the same task shape the rule-based path
/// produces.
pub struct HintNormalizer {
    date_resolver: DateResolver,
}

impl Default for HintNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HintNormalizer {
    /// Create a normalizer resolving fallback dates against today.
    pub fn new() -> Self {
        Self {
            date_resolver: DateResolver::new(),
        }
    }

    /// Create a normalizer with a specific reference date.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            date_resolver: DateResolver::with_reference_date(reference_date),
        }
    }

    /// Normalize a hint against the original prompt.
    ///
    /// Rejects the hint (empty vec) when it names no event. The date falls
    /// back to resolving the prompt, the start time falls back to the
    /// prompt's time-of-day and then to noon, and the duration defaults to
    /// 60 minutes.
    pub fn normalize(&self, hint: &ExternalHint, prompt: &str) -> Vec<Task> {
        if !hint.has_event_name() {
            debug!("hint names no event, rejecting");
            return Vec::new();
        }
        let name = hint.event_name.as_deref().unwrap_or_default().trim();

        let date = hint
            .date
            .as_deref()
            .and_then(parse_hint_date)
            .unwrap_or_else(|| self.date_resolver.resolve(prompt));

        let start = hint
            .start_time
            .as_deref()
            .and_then(parse_hint_time)
            .or_else(|| resolve_time_of_day(prompt))
            .unwrap_or(TimeOfDay::NOON);

        let duration_minutes = hint.duration_minutes.unwrap_or(60);

        let start_rendered = start.to_string();
        match end_after_minutes(&start_rendered, duration_minutes) {
            Ok(end) => vec![Task::new(name, start, end, date)],
            Err(e) => {
                warn!(start = %start_rendered, "end-time computation rejected hint: {e}");
                Vec::new()
            }
        }
    }
}

/// Parse a hint date, accepting only real `YYYY-MM-DD` calendar dates.
fn parse_hint_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a hint start time in 24-hour `HH:MM` form into its 12-hour
/// rendering. Malformed values yield `None` so the caller falls back to
/// the prompt.
fn parse_hint_time(s: &str) -> Option<TimeOfDay> {
    let pattern = Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("Invalid regex");
    let cap = pattern.captures(s)?;
    let hour = cap[1].parse::<u32>().ok()?;
    let minute = cap[2].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(from_24h(hour, minute))
}
