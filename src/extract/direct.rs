//! Direct rule-based task extraction.
//!
//! The fallback tier that needs no external help: resolve the date once,
//! run every activity recognizer, and synthesize a generic task when
//! nothing matches. Always yields at least one task.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::date::DateResolver;
use super::patterns::match_activities;
use super::temporal::{end_after_hours, resolve_duration_hours, resolve_time_of_day};
use super::types::{Task, TimeOfDay};

/// Fallback name when the prompt has no usable words.
const UNTITLED_TASK: &str = "Untitled task";

/// Rule-based prompt parser with an injectable reference date.
pub struct DirectParser {
    date_resolver: DateResolver,
}

impl Default for DirectParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectParser {
    /// Create a parser resolving dates against today.
    pub fn new() -> Self {
        Self {
            date_resolver: DateResolver::new(),
        }
    }

    /// Create a parser with a specific reference date.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            date_resolver: DateResolver::with_reference_date(reference_date),
        }
    }

    /// Parse a prompt into one or more tasks.
    ///
    /// The date is resolved once and shared by every task from this call.
    /// Each recognizer match becomes a task with the prompt's explicit
    /// duration (default one hour). Zero matches trigger the generic
    /// single-task fallback, so the result is never empty.
    pub fn parse(&self, prompt: &str) -> Vec<Task> {
        let date = self.date_resolver.resolve(prompt);
        let duration_hours = resolve_duration_hours(prompt);

        let mut tasks: Vec<Task> = match_activities(prompt)
            .into_iter()
            .map(|m| {
                debug!(label = %m.label, start = %m.start, "recognizer matched");
                Task::new(m.label, m.start, end_after_hours(m.start, duration_hours), date)
            })
            .collect();

        if tasks.is_empty() {
            tasks.push(self.generic_task(prompt, date, duration_hours));
        }

        info!(count = tasks.len(), "direct parsing produced tasks");
        tasks
    }

    /// Generic single-task fallback: any time-of-day occurrence (noon when
    /// absent) and the first five whitespace-separated words as the name.
    fn generic_task(&self, prompt: &str, date: NaiveDate, duration_hours: i64) -> Task {
        let start = resolve_time_of_day(prompt).unwrap_or(TimeOfDay::NOON);
        let end = end_after_hours(start, duration_hours);

        let name: String = prompt
            .split_whitespace()
            .take(5)
            .collect::<Vec<_>>()
            .join(" ");
        let name = if name.is_empty() {
            UNTITLED_TASK.to_string()
        } else {
            name
        };

        Task::new(name, start, end, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser_at(year: i32, month: u32, day: u32) -> DirectParser {
        DirectParser::with_reference_date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn test_lunch_with_sam() {
        // Reference 2025-06-10 is a Tuesday.
        let parser = parser_at(2025, 6, 10);
        let tasks = parser.parse("lunch with Sam at 1pm tomorrow");

        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0],
            Task {
                name: "Lunch with Sam".to_string(),
                start_time: "1:00 PM".to_string(),
                end_time: "2:00 PM".to_string(),
                date: "2025-06-11".to_string(),
            }
        );
    }

    #[test]
    fn test_gym_with_duration() {
        let parser = parser_at(2025, 6, 10);
        let tasks = parser.parse("gym at 7am for 2 hours");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Gym workout");
        assert_eq!(tasks[0].start_time, "7:00 AM");
        assert_eq!(tasks[0].end_time, "9:00 AM");
        // No date phrase: defaults to tomorrow.
        assert_eq!(tasks[0].date, "2025-06-11");
    }

    #[test]
    fn test_two_patterns_share_one_date() {
        let parser = parser_at(2025, 6, 10);
        let tasks = parser.parse("meeting with Dana at 11:30am and lunch with Sam at 1pm");

        assert_eq!(tasks.len(), 2);
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"Meeting with Dana"));
        assert!(names.contains(&"Lunch with Sam"));
        assert!(tasks.iter().all(|t| t.date == "2025-06-11"));
    }

    #[test]
    fn test_generic_fallback_defaults() {
        let parser = parser_at(2025, 6, 10);
        let tasks = parser.parse("organize the garage before winter arrives this year");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "organize the garage before winter");
        assert_eq!(tasks[0].start_time, "12:00 PM");
        assert_eq!(tasks[0].end_time, "1:00 PM");
    }

    #[test]
    fn test_generic_fallback_uses_found_time() {
        let parser = parser_at(2025, 6, 10);
        let tasks = parser.parse("call the bank at 3:15pm");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].start_time, "3:15 PM");
        assert_eq!(tasks[0].end_time, "4:15 PM");
    }

    #[test]
    fn test_empty_prompt_still_yields_a_task() {
        let parser = parser_at(2025, 6, 10);
        let tasks = parser.parse("");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Untitled task");
        assert_eq!(tasks[0].start_time, "12:00 PM");
        assert_eq!(tasks[0].end_time, "1:00 PM");
        assert_eq!(tasks[0].date, "2025-06-11");
    }
}
