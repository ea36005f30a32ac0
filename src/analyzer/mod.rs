//! External message analysis.
//!
//! An analyzer is an optional, fallible collaborator that may extract a
//! structured scheduling hint from a prompt. The scheduler treats every
//! analyzer failure — absence, timeout, garbage output — identically to
//! an empty result and falls back to rule-based extraction.

mod api;

pub use api::ApiAnalyzer;

use async_trait::async_trait;

use crate::error::AnalyzerError;
use crate::extract::ExternalHint;

/// Trait for external scheduling-message analyzers.
#[async_trait]
pub trait MessageAnalyzer: Send + Sync {
    /// Analyze a scheduling message into a structured hint.
    ///
    /// The hint is untrusted: any field may be absent and the caller
    /// validates everything.
    async fn analyze(&self, message: &str) -> Result<ExternalHint, AnalyzerError>;
}
