//! scrape command: pull KTC rankings and export them to CSV
//!
//! Dynasty board first, redraft board merged on top when asked for, then
//! projection, TEP and ordering, then the CSV file and optional upload.

use crate::config::{
    LeagueFormat, ScrapeConfig, TepTier, DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT,
};
use crate::error::{FetchError, UploadError};
use crate::export::build_export;
use crate::fetch::{fetch_rankings, HttpPageSource, PageSource, RankingRequest};
use crate::merge::merge_redraft_values;
use crate::player::PlayerRecord;
use crate::prompt::ask_league;
use crate::sink::{CsvSink, HttpObjectStore, ObjectStore, TableSink};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Args)]
pub struct ScrapeArgs {
    /// League format
    #[arg(long, short, value_enum, ignore_case = true, default_value = "1qb")]
    format: LeagueFormat,

    /// Export single-season (redraft) values instead of dynasty values
    #[arg(long)]
    redraft: bool,

    /// Tight End Premium tier: 0 none, 1 TE+, 2 TE++, 3 TE+++
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
    tep: u8,

    /// Upload the CSV to remote storage after writing it
    #[arg(long)]
    upload: bool,

    /// Storage bucket for --upload
    #[arg(long, env = "KTC_BUCKET")]
    bucket: Option<String>,

    /// Storage endpoint for --upload
    #[arg(long, env = "KTC_STORAGE_ENDPOINT")]
    storage_endpoint: Option<String>,

    /// Bearer token for the storage endpoint
    #[arg(long, env = "KTC_STORAGE_TOKEN", hide_env_values = true)]
    storage_token: Option<String>,

    /// Output CSV path
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Pages to read per ranking board
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pages: usize,

    /// Ranking site base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Timeout per page in milliseconds
    #[arg(long, default_value = "30000")]
    timeout: u64,

    /// Ask the league questions interactively instead of reading flags
    #[arg(long, short)]
    interactive: bool,

    /// Print a JSON summary instead of the success message
    #[arg(long)]
    json: bool,
}

impl ScrapeArgs {
    fn to_config(&self) -> Result<ScrapeConfig> {
        let mut config = ScrapeConfig {
            format: self.format,
            redraft: self.redraft,
            tep: TepTier::try_from(self.tep)?,
            upload: self.upload,
            bucket: self.bucket.clone().filter(|b| !b.is_empty()),
            output: self.output.clone(),
            max_pages: self.pages,
            base_url: self.base_url.clone(),
        };

        if self.interactive {
            let stdin = io::stdin();
            let answers = ask_league(&mut stdin.lock(), &mut io::stdout(), config.bucket.is_some())?;
            config.redraft = answers.redraft;
            config.format = answers.format;
            config.tep = answers.tep;
            config.upload = answers.upload;
        }

        Ok(config)
    }
}

/// Result of a completed run
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub file: String,
    pub rows: usize,
    pub generated: String,
    pub uploaded: bool,
}

/// Run the scrape command
pub async fn run_scrape(args: ScrapeArgs) -> Result<()> {
    let config = args.to_config()?;

    let source = HttpPageSource::new(Duration::from_millis(args.timeout))
        .context("Failed to create HTTP client")?;
    let store = HttpObjectStore::new(args.storage_endpoint.clone(), args.storage_token.clone());

    let now = Local::now();
    let summary = run_pipeline(&source, &store, &config, now).await?;

    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "Data exported to {} on {} successful.",
            summary.file,
            now.format("%B %d, %Y")
        );
    }

    Ok(())
}

/// Pull the dynasty board for the configured format and, for redraft
/// leagues, merge the redraft board into it
pub async fn scrape_ktc<S: PageSource>(
    source: &S,
    config: &ScrapeConfig,
) -> Result<Vec<PlayerRecord>, FetchError> {
    let dynasty = RankingRequest::new(config.format.board(false), &config.base_url, config.max_pages);
    let players = fetch_rankings(source, &dynasty).await?;

    if !config.redraft {
        return Ok(players);
    }

    let redraft = RankingRequest::new(config.format.board(true), &config.base_url, config.max_pages);
    merge_redraft_values(source, players, &redraft).await
}

/// Scrape, build the export table, write the CSV and upload it if asked.
///
/// Fetch and table errors abort the run. Upload errors are only warnings;
/// the local file stays written.
pub async fn run_pipeline<S: PageSource, O: ObjectStore>(
    source: &S,
    store: &O,
    config: &ScrapeConfig,
    now: DateTime<Local>,
) -> Result<ExportSummary> {
    let players = scrape_ktc(source, config).await?;

    let table = build_export(
        &players,
        config.format,
        config.effective_tep(),
        config.redraft,
        &now,
    )
    .context("Failed to build export table")?;

    let sink = CsvSink::new(&config.output);
    sink.write(&table)?;

    let uploaded = if config.upload {
        match upload_export(store, config).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "upload failed");
                eprintln!("Warning: upload failed: {}", e);
                false
            }
        }
    } else {
        false
    };

    eprintln!("Done: {} players exported", table.len());

    Ok(ExportSummary {
        file: sink.path().display().to_string(),
        rows: table.len(),
        generated: now.to_rfc3339(),
        uploaded,
    })
}

async fn upload_export<O: ObjectStore>(store: &O, config: &ScrapeConfig) -> Result<(), UploadError> {
    let bucket = config.bucket.as_deref().ok_or(UploadError::MissingBucket)?;
    let key = config
        .output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_OUTPUT);
    store.upload(&config.output, bucket, key).await
}
