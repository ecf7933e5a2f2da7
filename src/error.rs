//! Typed errors for the scrape pipeline

use thiserror::Error;

/// A ranking page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error while fetching {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP error while fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid page URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Invalid run configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid TEP value -- {0}")]
    InvalidTep(u8),

    #[error("unrecognized league format: {0}")]
    InvalidFormat(String),
}

/// Problems with the tabular dataset handed between export stages
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("row has {got} cells but header has {expected}")]
    Arity { expected: usize, got: usize },

    #[error("column not found: {0}")]
    MissingColumn(String),

    /// `rows + 1 - 25` is zero, so the TEP boost divides by zero
    #[error("TEP boost undefined for a table of {rows} rows (denominator is zero)")]
    TepDenominatorZero { rows: usize },
}

/// Remote upload failures; reported as warnings, never fatal
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no bucket configured (set KTC_BUCKET or --bucket)")]
    MissingBucket,

    #[error("storage credentials not available (set {0})")]
    MissingCredentials(&'static str),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage rejected upload: {status}")]
    Rejected { status: u16 },
}
