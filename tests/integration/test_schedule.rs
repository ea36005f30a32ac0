//! End-to-end scheduling policy tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;

use slated::{AnalyzerConfig, AnalyzerError, ExternalHint, MessageAnalyzer, Scheduler, Task};

/// Reference date used throughout: 2025-06-10, a Tuesday.
fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

/// A scheduler with the analyzer tier disabled.
fn rule_based_scheduler() -> Scheduler {
    Scheduler::new(None, &test_config())
}

fn test_config() -> AnalyzerConfig {
    AnalyzerConfig {
        retry_delay_ms: 0,
        ..AnalyzerConfig::default()
    }
}

/// Analyzer stub returning a fixed outcome.
struct CannedAnalyzer(Result<ExternalHint, ()>);

#[async_trait]
impl MessageAnalyzer for CannedAnalyzer {
    async fn analyze(&self, _message: &str) -> Result<ExternalHint, AnalyzerError> {
        match &self.0 {
            Ok(hint) => Ok(hint.clone()),
            Err(()) => Err(AnalyzerError::Unavailable("canned failure".to_string())),
        }
    }
}

/// Every returned task must be syntactically valid: a real calendar date
/// and 12-hour times with in-range minutes.
fn assert_valid(task: &Task) {
    assert!(!task.name.is_empty(), "blank name in {task:?}");

    let date_format = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    assert!(date_format.is_match(&task.date), "bad date in {task:?}");
    NaiveDate::parse_from_str(&task.date, "%Y-%m-%d")
        .unwrap_or_else(|_| panic!("not a calendar date: {task:?}"));

    let time_format = Regex::new(r"^\d{1,2}:[0-5]\d (AM|PM)$").unwrap();
    assert!(time_format.is_match(&task.start_time), "bad start in {task:?}");
    assert!(time_format.is_match(&task.end_time), "bad end in {task:?}");
}

#[tokio::test]
async fn test_reference_example() {
    let scheduler = rule_based_scheduler();
    let tasks = scheduler
        .schedule_at("lunch with Sam at 1pm tomorrow", reference())
        .await;

    assert_eq!(
        tasks,
        vec![Task {
            name: "Lunch with Sam".to_string(),
            start_time: "1:00 PM".to_string(),
            end_time: "2:00 PM".to_string(),
            date: "2025-06-11".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_multiple_activities_one_request() {
    let scheduler = rule_based_scheduler();
    let tasks = scheduler
        .schedule_at(
            "meeting with Dana at 11:30am and lunch with Sam at 1pm",
            reference(),
        )
        .await;

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].name, "Lunch with Sam");
    assert_eq!(tasks[1].name, "Meeting with Dana");
    assert_eq!(tasks[1].start_time, "11:30 AM");
    assert_eq!(tasks[0].date, tasks[1].date);
}

#[tokio::test]
async fn test_all_prompts_yield_valid_tasks() {
    let prompts = [
        "lunch with Sam at 1pm tomorrow",
        "gym at 7am for 2 hours",
        "class BIO202 at 10am next monday",
        "doctor appointment friday at 3:45pm",
        "interview on 7/21 at 9am",
        "dinner reservation May 20th",
        "completely unstructured text with no schedule at all",
        "",
        "   ",
        "9000",
        "meeting at 25pm",
    ];

    let scheduler = rule_based_scheduler();
    for prompt in prompts {
        let tasks = scheduler.schedule_at(prompt, reference()).await;
        assert!(!tasks.is_empty(), "no tasks for {prompt:?}");
        for task in &tasks {
            assert_valid(task);
        }
    }
}

#[tokio::test]
async fn test_analyzer_hint_flows_through() {
    let hint = ExternalHint {
        event_name: Some("Quarterly planning".to_string()),
        date: Some("2025-06-20".to_string()),
        start_time: Some("23:15".to_string()),
        duration_minutes: Some(90),
    };
    let scheduler = Scheduler::new(Some(Arc::new(CannedAnalyzer(Ok(hint)))), &test_config());

    let tasks = scheduler
        .schedule_at("quarterly planning session", reference())
        .await;

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Quarterly planning");
    assert_eq!(tasks[0].start_time, "11:15 PM");
    assert_eq!(tasks[0].end_time, "12:45 AM");
    assert_eq!(tasks[0].date, "2025-06-20");
}

#[tokio::test]
async fn test_nameless_hint_falls_back_to_rules() {
    let hint = ExternalHint {
        event_name: None,
        date: Some("2025-06-20".to_string()),
        start_time: Some("09:00".to_string()),
        duration_minutes: None,
    };
    let scheduler = Scheduler::new(Some(Arc::new(CannedAnalyzer(Ok(hint)))), &test_config());

    let tasks = scheduler
        .schedule_at("gym at 7am for 2 hours", reference())
        .await;

    // The hint was rejected; rule-based extraction took over.
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Gym workout");
    assert_eq!(tasks[0].start_time, "7:00 AM");
    assert_eq!(tasks[0].end_time, "9:00 AM");
}

#[tokio::test]
async fn test_failing_analyzer_falls_back_to_rules() {
    let scheduler = Scheduler::new(Some(Arc::new(CannedAnalyzer(Err(())))), &test_config());

    let tasks = scheduler
        .schedule_at("lunch with Sam at 1pm tomorrow", reference())
        .await;

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Lunch with Sam");
    assert_eq!(tasks[0].date, "2025-06-11");
}

#[tokio::test]
async fn test_partial_hint_backfills_from_prompt() {
    // The hint knows the event but neither date nor time; both come from
    // the prompt.
    let hint = ExternalHint {
        event_name: Some("Coffee with Riley".to_string()),
        date: None,
        start_time: None,
        duration_minutes: None,
    };
    let scheduler = Scheduler::new(Some(Arc::new(CannedAnalyzer(Ok(hint)))), &test_config());

    let tasks = scheduler
        .schedule_at("coffee with Riley tomorrow at 4pm", reference())
        .await;

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Coffee with Riley");
    assert_eq!(tasks[0].date, "2025-06-11");
    assert_eq!(tasks[0].start_time, "4:00 PM");
    assert_eq!(tasks[0].end_time, "5:00 PM");
}

#[tokio::test]
async fn test_generic_fallback_shape() {
    let scheduler = rule_based_scheduler();
    let tasks = scheduler
        .schedule_at(
            "completely unstructured text with no schedule at all",
            reference(),
        )
        .await;

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "completely unstructured text with no");
    assert_eq!(tasks[0].start_time, "12:00 PM");
    assert_eq!(tasks[0].end_time, "1:00 PM");
    assert_eq!(tasks[0].date, "2025-06-11");
}
