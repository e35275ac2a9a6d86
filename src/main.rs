use anyhow::Result;
use clap::Parser;

use pronunciation_converter::{batch, config, interactive, logging};
use pronunciation_converter::{Cli, Commands, Config, PronunciationFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_context = logging::init(cli.verbose)?;
    tracing::info!("Application started");

    // Fail fast on the one required credential before doing anything else
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{}", error);
            eprintln!("{} {}", console::style("Error:").red().bold(), error);
            std::process::exit(1);
        }
    };
    tracing::info!("Configuration loaded - Model: {}", config.model);

    match cli.command {
        Commands::Batch => {
            let fetcher = PronunciationFetcher::new(config)?;
            batch::run(&fetcher).await?;
        }
        Commands::Interactive => {
            let fetcher = PronunciationFetcher::new(config)?;
            interactive::run(&fetcher, log_context).await?;
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                println!(
                    "Configuration is compiled in; set the {} environment variable to supply the API credential.",
                    config::API_KEY_VAR
                );
                println!("Run with --show to display the active values.");
            }
        }
    }

    Ok(())
}
