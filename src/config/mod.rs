use std::time::Duration;

use anyhow::Result;
use url::Url;

use crate::ConverterError;

/// Completion endpoint every prompt is submitted to
pub const COMPLETION_ENDPOINT: &str = "https://api.together.xyz/completions";

/// Model identifier sent with every completion request
pub const MODEL: &str = "meta-llama/Llama-3-70b-chat-hf";

/// Environment variable holding the bearer credential
pub const API_KEY_VAR: &str = "API_KEY";

/// Token-generation ceiling per completion
const MAX_TOKENS: u32 = 200;

/// Sampling temperature; 0 selects deterministic decoding
const TEMPERATURE: f32 = 0.0;

/// Bound on each outbound request so a hung call cannot block a batch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the completion endpoint
    pub api_key: String,

    /// Completion endpoint URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Token-generation ceiling
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Timeout applied to each outbound request
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment. The credential is the one
    /// external knob; everything else is a compiled-in constant. Callers are
    /// expected to run this once at startup and stop on failure.
    pub fn from_env() -> Result<Self> {
        Self::from_key(std::env::var(API_KEY_VAR).ok())
    }

    fn from_key(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConverterError::MissingApiKey(API_KEY_VAR))?;

        let config = Self {
            api_key,
            endpoint: COMPLETION_ENDPOINT.to_string(),
            model: MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            request_timeout: REQUEST_TIMEOUT,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.endpoint)
            .map_err(|_| ConverterError::InvalidEndpoint(self.endpoint.clone()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConverterError::InvalidEndpoint(self.endpoint.clone()).into());
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Endpoint: {}", self.endpoint);
        println!("  Model: {}", self.model);
        println!("  Max Tokens: {}", self.max_tokens);
        println!("  Temperature: {}", self.temperature);
        println!("  Request Timeout: {}s", self.request_timeout.as_secs());
        println!("  API Key: {}", self.masked_key());
    }

    /// Credential with everything past the first four characters hidden
    pub fn masked_key(&self) -> String {
        let visible: String = self.api_key.chars().take(4).collect();
        format!("{visible}********")
    }
}
