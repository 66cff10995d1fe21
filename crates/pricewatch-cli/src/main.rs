use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricewatch_pipeline::{Pipeline, RunOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch-cli")]
#[command(about = "Pricewatch command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every configured page now and send the report.
    Run,
    /// Scrape and print the CSV without sending anything.
    Preview {
        /// Write the CSV to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("pricewatch-cli: use `run` or `preview` (see --help)");
        return Ok(());
    };

    let config = pricewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pipeline = Pipeline::from_app_config(&config)?;

    match command {
        Commands::Run => match pipeline.run().await {
            RunOutcome::Completed(summary) if summary.reported => {
                tracing::info!(
                    records = summary.records,
                    pages_fetched = summary.pages_fetched,
                    pages_skipped = summary.pages_skipped,
                    "cli: run complete, report sent"
                );
            }
            RunOutcome::Completed(summary) => {
                anyhow::bail!("scraped {} records but the report failed", summary.records);
            }
            RunOutcome::Skipped => anyhow::bail!("a run is already in progress"),
        },
        Commands::Preview { output } => {
            let scraped = pipeline.scrape().await;
            let csv = pricewatch_report::to_csv(&scraped.records)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    tracing::info!(
                        records = scraped.records.len(),
                        path = %path.display(),
                        "cli: preview written"
                    );
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
