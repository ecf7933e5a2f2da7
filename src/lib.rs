//! ktc-scrape: KeepTradeCut value scraper
//!
//! Pipeline:
//! - fetch: paginated ranking pulls, one board at a time
//! - extract / names: player cards to records
//! - merge: redraft values onto dynasty records by name
//! - export / tep: projection, Tight End Premium, final ordering
//! - sink: CSV file and optional upload

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod merge;
pub mod names;
pub mod player;
pub mod prompt;
pub mod scrape;
pub mod sink;
pub mod table;
pub mod tep;

pub use config::{Board, LeagueFormat, ScrapeConfig, TepTier};
pub use error::{ConfigError, FetchError, TableError, UploadError};
pub use player::{PlayerRecord, Valuation};
pub use scrape::{run_pipeline, scrape_ktc, ExportSummary};
pub use table::{Cell, Table};
