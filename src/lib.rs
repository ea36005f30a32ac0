//! Slated: Natural-Language Scheduling Backend
//!
//! Converts unstructured scheduling requests ("lunch with Sam at 1pm
//! tomorrow") into structured calendar task records through a layered
//! extraction strategy: an optional external analyzer first, a
//! rule-based parser as the fallback tier that cannot fail.

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod scheduler;

pub use analyzer::{ApiAnalyzer, MessageAnalyzer};
pub use api::{create_rest_router, ApiState, RestApiConfig, ScheduleRequest};
pub use config::{AnalyzerConfig, Config, ServerConfig};
pub use error::{AnalyzerError, ConfigError, ExtractError, Result, SlatedError};
pub use extract::{
    ActivityKind, ActivityMatch, DateResolver, DirectParser, ExternalHint, HintNormalizer,
    Meridiem, Task, TimeOfDay,
};
pub use scheduler::Scheduler;
