use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pronounce",
    about = "English to Telugu Pronunciation Converter - phonetic respellings via a hosted completion API",
    version,
    long_about = "Converts English words into phonetic pronunciation guides: a Latin-script approximation plus a Telugu-script phonetic transliteration. Phonetic knowledge comes entirely from a hosted large-language-model completion endpoint; this tool builds the prompt, submits it, and surfaces the parsed result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose console logging (the log file always captures everything)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the built-in word list and write pronunciations.json
    Batch,

    /// Interactive form: enter comma-separated words, see results and counts
    Interactive,

    /// Inspect the active configuration
    Config {
        /// Show current configuration (credential masked)
        #[arg(short, long)]
        show: bool,
    },
}
