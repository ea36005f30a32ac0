//! Top-level scheduling policy.
//!
//! The scheduler ties the two extraction tiers together: the optional
//! external analyzer first, the rule-based direct parser as the fallback
//! that cannot fail. Analyzer trouble is retried a bounded number of
//! times and expressed as an outcome value the policy branches on; no
//! failure mode ever reaches the caller, and the result is never empty.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::analyzer::MessageAnalyzer;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::extract::{DirectParser, ExternalHint, HintNormalizer, Task};

/// The request-scoped scheduling orchestrator.
pub struct Scheduler {
    analyzer: Option<Arc<dyn MessageAnalyzer>>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Scheduler {
    /// Create a scheduler. Passing `None` disables the analyzer tier
    /// entirely.
    pub fn new(analyzer: Option<Arc<dyn MessageAnalyzer>>, config: &AnalyzerConfig) -> Self {
        Self {
            analyzer,
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Convert a prompt into tasks, resolving relative dates against the
    /// current wall clock.
    pub async fn schedule(&self, prompt: &str) -> Vec<Task> {
        self.schedule_at(prompt, Local::now().date_naive()).await
    }

    /// Convert a prompt into tasks against an explicit reference date.
    ///
    /// Policy: analyzer (when configured) with bounded retry, then hint
    /// normalization; any failure or empty result degrades to the direct
    /// parser, whose output is always non-empty.
    pub async fn schedule_at(&self, prompt: &str, reference_date: NaiveDate) -> Vec<Task> {
        if let Some(analyzer) = &self.analyzer {
            match self.analyze_with_retry(analyzer.as_ref(), prompt).await {
                Ok(hint) => {
                    let tasks =
                        HintNormalizer::with_reference_date(reference_date).normalize(&hint, prompt);
                    if !tasks.is_empty() {
                        info!(count = tasks.len(), "analyzer path produced tasks");
                        return tasks;
                    }
                    info!("analyzer hint yielded no tasks, using direct parsing");
                }
                Err(e) => {
                    warn!(
                        max_attempts = self.max_attempts,
                        "analyzer exhausted, using direct parsing: {e}"
                    );
                }
            }
        }

        DirectParser::with_reference_date(reference_date).parse(prompt)
    }

    /// Bounded retry loop for the analyzer call, returning the last error
    /// when every attempt fails.
    async fn analyze_with_retry(
        &self,
        analyzer: &dyn MessageAnalyzer,
        prompt: &str,
    ) -> Result<ExternalHint, AnalyzerError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match analyzer.analyze(prompt).await {
                Ok(hint) => return Ok(hint),
                Err(e) => {
                    if attempt < self.max_attempts {
                        warn!(
                            attempt,
                            max_attempts = self.max_attempts,
                            "analyzer request failed, retrying: {e}"
                        );
                        tokio::time::sleep(self.retry_delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AnalyzerError::Unavailable("no attempts made".to_string())))
    }
}
