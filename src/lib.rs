//! Pronunciation Converter - turn English words into phonetic guides
//!
//! This library converts English words into pronunciation guides rendered two
//! ways: a Latin-script approximation and a Telugu-script phonetic
//! transliteration. All phonetic knowledge comes from a hosted text-completion
//! endpoint; the library builds the prompt, submits it, and parses a JSON
//! object out of the raw completion text.

pub mod batch;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod interactive;
pub mod logging;
pub mod output;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use fetcher::{PronunciationFetcher, PronunciationRecord};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the converter
#[derive(thiserror::Error, Debug)]
pub enum ConverterError {
    #[error("{0} not found in environment variables. Set it before starting the tool")]
    MissingApiKey(&'static str),

    #[error("Invalid completion endpoint: {0}")]
    InvalidEndpoint(String),
}
