//! ktc CLI
//!
//! Scrapes KeepTradeCut dynasty and redraft rankings into a CSV, with
//! optional Tight End Premium adjustment and remote upload.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ktc_scrape::scrape::{run_scrape, ScrapeArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ktc")]
#[command(version)]
#[command(about = "KeepTradeCut value scraper with Tight End Premium adjustment")]
#[command(long_about = "Scrapes player values from keeptradecut.com and exports them to CSV.\n\nCommands:\n  scrape    Pull dynasty/redraft rankings and write ktc.csv")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull rankings, apply TEP and write the CSV export
    Scrape(ScrapeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape(args) => run_scrape(args).await,
    }
}
