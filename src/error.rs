//! Error types for the slated scheduling backend.

use thiserror::Error;

/// Main error type for slated operations.
#[derive(Error, Debug)]
pub enum SlatedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Extraction-related errors.
///
/// A malformed time string is a loud failure: it means an upstream resolver
/// produced a value the end-time calculator cannot read, which is a defect
/// rather than bad user input. Invalid candidate dates are absorbed by the
/// date rule chain and never abort a request.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Malformed time string: {0:?}")]
    MalformedTime(String),

    #[error("Invalid calendar date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// External analyzer errors. All variants are non-fatal at the scheduler
/// tier and trigger fallback to the rule-based path.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Analyzer unavailable: {0}")]
    Unavailable(String),

    #[error("Analyzer request timed out")]
    Timeout,

    #[error("Analyzer returned an unusable response: {0}")]
    BadResponse(String),

    #[error("Analyzer API key not configured")]
    MissingKey,
}

/// Result type alias for slated operations.
pub type Result<T> = std::result::Result<T, SlatedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err =
            SlatedError::Config(ConfigError::MissingField("analyzer.api_endpoint".to_string()));
        assert!(err.to_string().contains("analyzer.api_endpoint"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SlatedError = io_err.into();
        assert!(matches!(err, SlatedError::Io(_)));
    }

    #[test]
    fn test_malformed_time_is_loud() {
        let err: SlatedError = ExtractError::MalformedTime("1pm-ish".to_string()).into();
        assert!(err.to_string().contains("1pm-ish"));
    }
}
