//! Activity recognizers: named patterns that bind an activity label and a
//! start time from a scheduling prompt.
//!
//! Recognizers are independent and evaluated in a fixed priority order
//! against the same prompt, so "lunch with Sam at 1pm, then gym at 3pm"
//! produces two bindings.

use regex::{Captures, Regex};

use super::temporal::TIME_PATTERN;
use super::types::{ActivityKind, ActivityMatch, Meridiem, TimeOfDay};

/// Run every recognizer against the prompt, in priority order:
/// lunch, gym, class, meeting, appointment.
pub fn match_activities(prompt: &str) -> Vec<ActivityMatch> {
    const RECOGNIZERS: [fn(&str) -> Option<ActivityMatch>; 5] = [
        match_lunch,
        match_gym,
        match_class,
        match_meeting,
        match_appointment,
    ];

    RECOGNIZERS
        .iter()
        .filter_map(|recognizer| recognizer(prompt))
        .collect()
}

/// `lunch with <name> ... <time>`
fn match_lunch(prompt: &str) -> Option<ActivityMatch> {
    let pattern =
        Regex::new(&format!(r"(?i)lunch with (\w+).*?{}", TIME_PATTERN)).expect("Invalid regex");
    let cap = pattern.captures(prompt)?;
    Some(ActivityMatch {
        kind: ActivityKind::Lunch,
        label: format!("Lunch with {}", &cap[1]),
        start: time_from_captures(&cap, 2)?,
    })
}

/// `gym ... <time>`
fn match_gym(prompt: &str) -> Option<ActivityMatch> {
    let pattern = Regex::new(&format!(r"(?i)gym.*?{}", TIME_PATTERN)).expect("Invalid regex");
    let cap = pattern.captures(prompt)?;
    Some(ActivityMatch {
        kind: ActivityKind::Gym,
        label: "Gym workout".to_string(),
        start: time_from_captures(&cap, 1)?,
    })
}

/// `class <id> ... <time>`
fn match_class(prompt: &str) -> Option<ActivityMatch> {
    let pattern =
        Regex::new(&format!(r"(?i)class\s+(\w+).*?{}", TIME_PATTERN)).expect("Invalid regex");
    let cap = pattern.captures(prompt)?;
    Some(ActivityMatch {
        kind: ActivityKind::Class,
        label: format!("Class {}", &cap[1]),
        start: time_from_captures(&cap, 2)?,
    })
}

/// `meet(ing)? (with)? <name> ... <time>`
fn match_meeting(prompt: &str) -> Option<ActivityMatch> {
    let pattern = Regex::new(&format!(
        r"(?i)meet(?:ing)?\s+(?:with)?\s*(\w+).*?{}",
        TIME_PATTERN
    ))
    .expect("Invalid regex");
    let cap = pattern.captures(prompt)?;
    Some(ActivityMatch {
        kind: ActivityKind::Meeting,
        label: format!("Meeting with {}", &cap[1]),
        start: time_from_captures(&cap, 2)?,
    })
}

/// `appointment|doctor|dentist|interview ... <time>`, labeled by the
/// capitalized trigger word.
fn match_appointment(prompt: &str) -> Option<ActivityMatch> {
    let pattern = Regex::new(&format!(
        r"(?i)(appointment|doctor|dentist|interview).*?{}",
        TIME_PATTERN
    ))
    .expect("Invalid regex");
    let cap = pattern.captures(prompt)?;
    Some(ActivityMatch {
        kind: ActivityKind::Appointment,
        label: format!("{} appointment", capitalize(&cap[1])),
        start: time_from_captures(&cap, 2)?,
    })
}

/// Read the shared time vocabulary's hour/minute/meridiem groups starting
/// at `first_group`.
fn time_from_captures(cap: &Captures<'_>, first_group: usize) -> Option<TimeOfDay> {
    let hour = cap[first_group].parse::<u32>().ok()?;
    let minute_text = &cap[first_group + 1];
    let minute = match minute_text.is_empty() {
        true => 0,
        false => minute_text.parse::<u32>().ok()?,
    };
    let meridiem = Meridiem::parse(&cap[first_group + 2])?;
    Some(TimeOfDay::new(hour, minute, meridiem))
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => lower,
    }
}
