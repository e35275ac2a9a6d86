use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::Result;

/// Successful pronunciation lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationResult {
    /// The word as submitted
    pub word: String,

    /// Latin-script approximate phonetics
    pub pronunciation: String,

    /// Telugu-script phonetic rendering
    pub pronunciation_telugu: String,
}

/// Failed pronunciation lookup. Failures travel as data so that one bad word
/// never halts the rest of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationError {
    /// Human-readable failure category
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Unmodified completion text, preserved for diagnosis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

impl PronunciationError {
    fn new(word: &str, category: impl Into<String>) -> Self {
        Self {
            error: category.into(),
            details: None,
            raw_output: None,
            word: Some(word.to_string()),
        }
    }

    fn with_details(word: &str, category: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(word, category)
        }
    }

    fn with_raw_output(word: &str, category: impl Into<String>, raw: &str) -> Self {
        Self {
            raw_output: Some(raw.to_string()),
            ..Self::new(word, category)
        }
    }
}

/// One entry of a result set. Success and failure share the output stream and
/// are distinguished in JSON by the presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PronunciationRecord {
    Success(PronunciationResult),
    Failure(PronunciationError),
}

impl PronunciationRecord {
    pub fn is_success(&self) -> bool {
        matches!(self, PronunciationRecord::Success(_))
    }
}

/// Completion request body
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

/// Completion response envelope; only the generated text is of interest
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Turns one English word into a pronunciation record by prompting the
/// completion endpoint. Transport, parse, and unexpected failures are all
/// contained here and returned as `Failure` records; `fetch` never errors
/// past its own boundary.
pub struct PronunciationFetcher {
    client: Client,
    config: Config,
}

impl PronunciationFetcher {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch the pronunciation guide for a single word
    pub async fn fetch(&self, word: &str) -> PronunciationRecord {
        tracing::info!("Processing word: '{}'", word);

        let prompt = build_prompt(word);
        tracing::debug!("Prompt built for '{}' - {} characters", word, prompt.len());

        let request = CompletionRequest {
            model: &self.config.model,
            prompt: &prompt,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        tracing::debug!(
            "Request parameters - max_tokens: {}, temperature: {}",
            request.max_tokens,
            request.temperature
        );

        tracing::info!("Sending completion request for word: '{}'", word);
        let response = match self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => return PronunciationRecord::Failure(transport_failure(word, &error)),
        };

        let status = response.status();
        tracing::info!("Completion response received - status: {}", status);

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => return PronunciationRecord::Failure(transport_failure(word, &error)),
        };

        interpret_response(word, status, &body)
    }
}

/// Map a network-level failure onto its error category, keeping timeouts
/// distinct from connection failures
fn transport_failure(word: &str, error: &reqwest::Error) -> PronunciationError {
    if error.is_timeout() {
        tracing::error!("Completion request timeout for word '{}'", word);
        PronunciationError::new(word, "Request timeout")
    } else if error.is_connect() {
        tracing::error!("Connection error for word '{}': {}", word, error);
        PronunciationError::with_details(word, "Connection error", error.to_string())
    } else {
        tracing::error!("Unexpected error processing word '{}': {}", word, error);
        PronunciationError::with_details(word, "Unexpected error", error.to_string())
    }
}

/// Interpret a completion response body according to its HTTP status
fn interpret_response(word: &str, status: StatusCode, body: &str) -> PronunciationRecord {
    if status != StatusCode::OK {
        tracing::error!("Completion request failed with status {}", status);
        tracing::error!("Error details: {}", body);
        return PronunciationRecord::Failure(PronunciationError::with_details(
            word,
            format!("API request failed with status {}", status.as_u16()),
            body,
        ));
    }

    let envelope: CompletionResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(error) => {
            tracing::error!("Malformed completion envelope for word '{}': {}", word, error);
            return PronunciationRecord::Failure(PronunciationError::with_details(
                word,
                "Unexpected error",
                format!("malformed completion envelope: {error}"),
            ));
        }
    };

    let Some(choice) = envelope.choices.into_iter().next() else {
        tracing::error!("Completion response contained no choices for word '{}'", word);
        return PronunciationRecord::Failure(PronunciationError::with_details(
            word,
            "Unexpected error",
            "completion response contained no choices",
        ));
    };

    interpret_completion(word, &choice.text)
}

/// Clean up the completion text and strict-parse it into a result. The parse
/// requires all three pronunciation keys; valid JSON of the wrong shape is a
/// parse failure like any other, with the unmodified text preserved.
fn interpret_completion(word: &str, text: &str) -> PronunciationRecord {
    tracing::debug!("Extracted completion text: {}", text);

    let cleaned = clean_completion_text(text);
    tracing::debug!("Cleaned text: {}", cleaned);

    match serde_json::from_str::<PronunciationResult>(cleaned) {
        Ok(result) => {
            tracing::info!("Successfully parsed pronunciation for word '{}'", word);
            PronunciationRecord::Success(result)
        }
        Err(error) => {
            tracing::error!("JSON parse failure for word '{}': {}", word, error);
            tracing::error!("Failed to parse text: {}", cleaned);
            PronunciationRecord::Failure(PronunciationError::with_raw_output(
                word,
                "Failed to parse JSON from model output",
                text,
            ))
        }
    }
}

/// Strip surrounding whitespace and triple-backtick fencing. Idempotent:
/// already-clean text comes back unchanged.
fn clean_completion_text(text: &str) -> &str {
    text.trim().trim_matches('`').trim()
}

/// Instruction prompt: states the two-step transformation, embeds one worked
/// example pair to steer the output format, and demands a bare JSON object
/// with exactly three keys.
fn build_prompt(word: &str) -> String {
    format!(
        r#"You are a language assistant. I will provide an English word. Your task is to:

1. Convert the English word into its correct pronunciation in English in USA style (like Toilet: 'TOy Luht').
2. Convert that pronunciation into a Telugu representation of the sounds.

Respond in JSON format as shown in the example.

Example input: 'toilet'
Example output:
{{
  "word": "toilet",
  "pronunciation": "TOy Luht",
  "pronunciation_telugu": "టాయ్ లహ్ట్"
}}

Note: Do not include any additional text or explanations, only the JSON object. Do not include any markdown formatting. Ensure the Telugu representation captures the phonetic sounds accurately.
Now process the following word: '{word}'"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCED: &str = "```{\"word\":\"toilet\",\"pronunciation\":\"TOy Luht\",\"pronunciation_telugu\":\"టాయ్ లహ్ట్\"}```";

    fn toilet_result() -> PronunciationResult {
        PronunciationResult {
            word: "toilet".to_string(),
            pronunciation: "TOy Luht".to_string(),
            pronunciation_telugu: "టాయ్ లహ్ట్".to_string(),
        }
    }

    #[test]
    fn cleanup_strips_whitespace_and_fencing() {
        assert_eq!(
            clean_completion_text("  ```{\"word\":\"water\"}```\n"),
            "{\"word\":\"water\"}"
        );
    }

    #[test]
    fn cleanup_is_idempotent() {
        let plain = r#"{"word":"water","pronunciation":"WAH tur","pronunciation_telugu":"వా"}"#;
        assert_eq!(clean_completion_text(plain), plain);

        let once = clean_completion_text(FENCED);
        assert_eq!(clean_completion_text(once), once);
    }

    #[test]
    fn fenced_completion_parses_to_the_exact_result() {
        let record = interpret_completion("toilet", FENCED);
        assert_eq!(record, PronunciationRecord::Success(toilet_result()));
    }

    #[test]
    fn non_json_completion_preserves_raw_output() {
        let record = interpret_completion("toilet", "not json at all");
        match record {
            PronunciationRecord::Failure(failure) => {
                assert!(failure.error.contains("parse JSON"));
                assert_eq!(failure.raw_output.as_deref(), Some("not json at all"));
                assert_eq!(failure.word.as_deref(), Some("toilet"));
            }
            other => panic!("expected a failure record, got {other:?}"),
        }
    }

    #[test]
    fn json_missing_required_keys_is_a_parse_failure() {
        let record = interpret_completion("toilet", r#"{"word":"toilet"}"#);
        match record {
            PronunciationRecord::Failure(failure) => {
                assert!(failure.error.contains("parse JSON"));
                assert_eq!(failure.raw_output.as_deref(), Some(r#"{"word":"toilet"}"#));
            }
            other => panic!("expected a failure record, got {other:?}"),
        }
    }

    #[test]
    fn status_500_maps_to_a_request_failure() {
        let record =
            interpret_response("toilet", StatusCode::INTERNAL_SERVER_ERROR, "internal error");
        match record {
            PronunciationRecord::Failure(failure) => {
                assert!(failure.error.contains("500"));
                assert_eq!(failure.details.as_deref(), Some("internal error"));
                assert_eq!(failure.word.as_deref(), Some("toilet"));
            }
            other => panic!("expected a failure record, got {other:?}"),
        }
    }

    #[test]
    fn successful_envelope_yields_a_success_record() {
        let body = serde_json::json!({ "choices": [{ "text": FENCED }] }).to_string();
        let record = interpret_response("toilet", StatusCode::OK, &body);
        assert_eq!(record, PronunciationRecord::Success(toilet_result()));
    }

    #[test]
    fn empty_choices_is_an_unexpected_error() {
        let record = interpret_response("toilet", StatusCode::OK, r#"{"choices":[]}"#);
        match record {
            PronunciationRecord::Failure(failure) => {
                assert_eq!(failure.error, "Unexpected error");
                assert_eq!(
                    failure.details.as_deref(),
                    Some("completion response contained no choices")
                );
            }
            other => panic!("expected a failure record, got {other:?}"),
        }
    }

    #[test]
    fn prompt_embeds_the_worked_example_and_the_word() {
        let prompt = build_prompt("computer");
        assert!(prompt.contains("'computer'"));
        assert!(prompt.contains("TOy Luht"));
        assert!(prompt.contains("టాయ్ లహ్ట్"));
        assert!(prompt.contains("pronunciation_telugu"));
    }

    #[test]
    fn result_set_round_trips_with_telugu_preserved() {
        let records = vec![
            PronunciationRecord::Success(toilet_result()),
            PronunciationRecord::Failure(PronunciationError::with_raw_output(
                "water",
                "Failed to parse JSON from model output",
                "not json at all",
            )),
        ];

        let json = serde_json::to_string_pretty(&records).unwrap();
        assert!(json.contains("టాయ్ లహ్ట్"));
        assert!(!json.contains("\\u"));
        // absent optional fields are omitted, not null
        assert!(!json.contains("details"));

        let parsed: Vec<PronunciationRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn error_record_deserializes_as_failure() {
        let json = r#"{"error":"Request timeout","word":"water"}"#;
        let record: PronunciationRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_success());
    }
}
