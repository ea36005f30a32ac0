//! Task extraction pipeline for scheduling prompts.
//!
//! This module turns free-text scheduling requests into structured
//! [`Task`] records through two paths that share the same resolvers:
//!
//! ```text
//! Prompt Text
//!       │
//!       ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                 Extraction Pipeline                        │
//! │  ┌──────────────┐ ┌──────────────┐ ┌────────────────────┐ │
//! │  │     Date     │ │   Temporal   │ │     Activity       │ │
//! │  │   Resolver   │ │  Resolvers   │ │    Recognizers     │ │
//! │  └──────────────┘ └──────────────┘ └────────────────────┘ │
//! │  ┌─────────────────────────┐ ┌───────────────────────────┐│
//! │  │      DirectParser       │ │      HintNormalizer       ││
//! │  │  (rule-based, total)    │ │  (external hints, partial)││
//! │  └─────────────────────────┘ └───────────────────────────┘│
//! └───────────────────────────────────────────────────────────┘
//!       │
//!       ▼
//! Calendar Tasks
//! ```
//!
//! # Components
//!
//! - **Date Resolver**: relative/absolute date phrases against a reference
//!   "now"
//! - **Temporal Resolvers**: time-of-day capture, duration inference, and
//!   end-time arithmetic
//! - **Activity Recognizers**: prioritized named patterns (lunch, gym,
//!   class, meeting, appointment)
//! - **DirectParser**: the always-succeeding rule-based orchestrator
//! - **HintNormalizer**: validation of loosely-structured analyzer hints
//!   into the same task shape

pub mod date;
mod direct;
mod hint;
mod patterns;
pub mod temporal;
mod types;

pub use date::DateResolver;
pub use direct::DirectParser;
pub use hint::HintNormalizer;
pub use patterns::match_activities;
pub use types::{ActivityKind, ActivityMatch, ExternalHint, Meridiem, Task, TimeOfDay};
