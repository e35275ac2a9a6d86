use std::time::Instant;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::fetcher::{PronunciationFetcher, PronunciationRecord};
use crate::logging::LogContext;
use crate::utils::{format_file_size, input};
use crate::{output, Result};

/// Sample word list pre-filling the form input
const SAMPLE_WORDS: &str = "toilet, computer, water";

/// Lines shown from the end of the log file in the log panel
const LOG_TAIL_LINES: usize = 20;

/// Split comma-separated input into trimmed, non-empty words
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run the interactive form: prompt for a comma-separated word list, convert
/// each word sequentially, display the result set with summary counters, and
/// offer a timestamped JSON save. One form submission at a time; the loop
/// idles between triggers until the user quits.
pub async fn run(fetcher: &PronunciationFetcher, log_context: &LogContext) -> Result<()> {
    tracing::info!("Initializing interactive form");

    println!();
    println!(
        "{}",
        style("English to Telugu Pronunciation Converter").bold()
    );
    println!("Enter English words (comma-separated) to get their pronunciation in English and Telugu.");
    println!("Press Enter to convert the sample list, or type 'logs' or 'quit'.");
    println!();

    loop {
        let line = input(&format!("Words [{SAMPLE_WORDS}]: "))?;
        let line = line.trim();

        match line {
            "quit" | "exit" | "q" => break,
            "logs" => show_log_panel(log_context)?,
            _ => {
                let text = if line.is_empty() { SAMPLE_WORDS } else { line };
                convert(fetcher, text).await?;
            }
        }
        println!();
    }

    Ok(())
}

/// One form submission: validate, process sequentially, display
async fn convert(fetcher: &PronunciationFetcher, text: &str) -> Result<()> {
    tracing::info!("Convert triggered");
    tracing::info!("Raw input received: '{}'", text);

    let words = parse_word_list(text);
    tracing::info!("Parsed {} words: {:?}", words.len(), words);

    if words.is_empty() {
        tracing::warn!("No valid words entered");
        println!("{}", style("Please enter at least one word.").yellow());
        return Ok(());
    }

    let mut records = Vec::with_capacity(words.len());
    let mut successful = 0usize;
    let mut failed = 0usize;

    tracing::info!("Starting processing of {} words", words.len());
    let started = Instant::now();

    let progress = ProgressBar::new(words.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap(),
    );

    for (index, word) in words.iter().enumerate() {
        progress.set_message(word.clone());
        tracing::info!("Processing word {}/{}: '{}'", index + 1, words.len(), word);

        let record = fetcher.fetch(word).await;
        match &record {
            PronunciationRecord::Success(_) => {
                successful += 1;
                tracing::info!("Successful conversion for word '{}'", word);
            }
            PronunciationRecord::Failure(failure) => {
                failed += 1;
                tracing::warn!("Failed conversion for word '{}': {}", word, failure.error);
            }
        }
        records.push(record);
        progress.inc(1);
    }
    progress.finish_and_clear();

    tracing::info!(
        "Processing completed in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    tracing::info!("Results - Successful: {}, Failed: {}", successful, failed);

    println!();
    println!("{}", style("Results").bold().underlined());
    println!("{}", output::render_result_set(&records)?);
    println!();
    println!("  Total Words: {}", words.len());
    println!("  {} {}", style("Successful:").green(), successful);
    println!("  {} {}", style("Failed:").red(), failed);
    println!();

    let answer = input("Save results to a JSON file? (y/N): ")?;
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        let filename = output::timestamped_filename();
        output::save_result_set(&records, filename.as_ref()).await?;
        tracing::info!("Results saved to {}", filename);
        println!("Results saved to {filename}");
    }

    Ok(())
}

/// Operator debugging panel: where the log file lives, how big it is, and
/// its most recent entries on demand
fn show_log_panel(log_context: &LogContext) -> Result<()> {
    println!();
    println!("{}", style("Logging Information").bold());
    println!("  Log file: {}", log_context.file_name());
    println!("  Location: {}", log_context.path().display());
    match log_context.size() {
        Ok(size) => println!("  Size: {}", format_file_size(size)),
        Err(error) => println!("  Size: unavailable ({error})"),
    }

    let answer = input("Show recent log entries? (y/N): ")?;
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        match log_context.tail(LOG_TAIL_LINES) {
            Ok(tail) => {
                println!("{}", style("Recent Log Entries").bold());
                println!("{tail}");
            }
            Err(error) => println!("{}", style(format!("Error reading log file: {error}")).red()),
        }
    }

    Ok(())
}
