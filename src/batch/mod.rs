use std::path::Path;

use anyhow::Context;

use crate::fetcher::PronunciationFetcher;
use crate::output;
use crate::Result;

/// Fixed word list processed by the batch runner
pub const BATCH_WORDS: [&str; 3] = ["toilet", "computer", "water"];

/// Relative path the batch result set is written to
pub const BATCH_OUTPUT_PATH: &str = "pronunciations.json";

/// Process the fixed word list sequentially and write the collected result
/// set to `pronunciations.json`. A failure record for one word is stored in
/// place and does not halt the remaining words; there are no retries.
pub async fn run(fetcher: &PronunciationFetcher) -> Result<()> {
    tracing::info!("Starting batch run over {} words", BATCH_WORDS.len());

    let mut records = Vec::with_capacity(BATCH_WORDS.len());
    for word in BATCH_WORDS {
        records.push(fetcher.fetch(word).await);
    }

    output::save_result_set(&records, Path::new(BATCH_OUTPUT_PATH))
        .await
        .with_context(|| format!("Failed to write {BATCH_OUTPUT_PATH}"))?;

    println!("Output saved to {BATCH_OUTPUT_PATH}");
    Ok(())
}
