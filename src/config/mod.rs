//! Configuration for the slated server.

mod settings;

pub use settings::{AnalyzerConfig, Config, ServerConfig};
