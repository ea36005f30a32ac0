//! API-based message analyzer (OpenAI-compatible chat completions).

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::extract::ExternalHint;

use super::MessageAnalyzer;

/// Environment variable consulted when the config carries no API key.
pub const API_KEY_ENV: &str = "SLATED_ANALYZER_API_KEY";

/// Chat-completions analyzer for any OpenAI-compatible endpoint.
pub struct ApiAnalyzer {
    client: Client,
    api_endpoint: String,
    model: String,
    api_key: String,
}

/// Chat completion request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

impl ApiAnalyzer {
    /// Create an analyzer from configuration. The API key comes from the
    /// config or the `SLATED_ANALYZER_API_KEY` environment variable.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or(AnalyzerError::MissingKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalyzerError::Unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Instructions asking the model for exactly the hint fields.
    fn build_prompt(message: &str) -> String {
        format!(
            r#"Extract scheduling information from this message: "{message}"

Return ONLY a JSON object with these fields:
- event_name: name or title of the event
- date: date in YYYY-MM-DD format
- start_time: start time in HH:MM format (24-hour)
- duration_minutes: duration in minutes

If a field is missing or unclear, set it to null. No additional text."#
        )
    }

    /// Parse a model reply into a hint: the first JSON object in the text,
    /// with per-field regex scraping as the fallback for replies that are
    /// not clean JSON.
    fn parse_reply(reply: &str) -> ExternalHint {
        let json_pattern = Regex::new(r"(?s)\{.*\}").expect("Invalid regex");
        if let Some(m) = json_pattern.find(reply) {
            if let Ok(hint) = serde_json::from_str::<ExternalHint>(m.as_str()) {
                return hint;
            }
        }

        debug!("analyzer reply is not clean JSON, scraping fields");
        Self::scrape_fields(reply)
    }

    /// Field-by-field extraction from a free-form reply. `null`/`none`
    /// literals count as absent.
    fn scrape_fields(text: &str) -> ExternalHint {
        let scrape = |field: &str| -> Option<String> {
            let pattern =
                Regex::new(&format!(r#"{}["\s:]+([^",\n]+)"#, field)).expect("Invalid regex");
            let value = pattern.captures(text)?.get(1)?.as_str().trim().to_string();
            match value.to_lowercase().as_str() {
                "null" | "none" => None,
                _ => Some(value),
            }
        };

        let duration_pattern =
            Regex::new(r#"duration(?:_minutes)?["\s:]+(\d+)"#).expect("Invalid regex");
        let duration_minutes = duration_pattern
            .captures(text)
            .and_then(|cap| cap[1].parse::<i64>().ok());

        ExternalHint {
            event_name: scrape("event_name"),
            date: scrape("date"),
            start_time: scrape("start_time"),
            duration_minutes,
        }
    }
}

#[async_trait]
impl MessageAnalyzer for ApiAnalyzer {
    async fn analyze(&self, message: &str) -> Result<ExternalHint, AnalyzerError> {
        let prompt = Self::build_prompt(message);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You extract structured scheduling information from user messages.",
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyzerError::Timeout
                } else if e.is_connect() {
                    AnalyzerError::Unavailable(format!("Connection failed: {e}"))
                } else {
                    AnalyzerError::Unavailable(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalyzerError::Unavailable(format!(
                "API error ({status}): {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::BadResponse(format!("Failed to parse response: {e}")))?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| AnalyzerError::BadResponse("Response carried no choices".to_string()))?;

        Ok(Self::parse_reply(content))
    }
}
