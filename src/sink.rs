//! Output sinks: local CSV file and optional remote object storage

use crate::error::UploadError;
use crate::table::Table;
use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable holding the storage endpoint
pub const ENDPOINT_ENV: &str = "KTC_STORAGE_ENDPOINT";
/// Environment variable holding the storage bearer token
pub const TOKEN_ENV: &str = "KTC_STORAGE_TOKEN";

/// Writes the finished table somewhere
pub trait TableSink {
    fn write(&self, table: &Table) -> Result<()>;
}

/// UTF-8, comma-delimited CSV with the header row first and no index column
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for CsvSink {
    fn write(&self, table: &Table) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        for record in table.records() {
            writer.write_record(&record)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), rows = table.len(), "csv written");
        Ok(())
    }
}

/// Stores a local file under `bucket/key` somewhere remote
pub trait ObjectStore {
    fn upload(
        &self,
        local_path: &Path,
        bucket: &str,
        key: &str,
    ) -> impl Future<Output = Result<(), UploadError>> + Send;
}

/// Path-style HTTP object store: `PUT {endpoint}/{bucket}/{key}`
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: Option<String>,
    token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(endpoint: Option<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
        }
    }

    pub fn object_url(endpoint: &str, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
    }
}

impl ObjectStore for HttpObjectStore {
    async fn upload(&self, local_path: &Path, bucket: &str, key: &str) -> Result<(), UploadError> {
        if bucket.is_empty() {
            return Err(UploadError::MissingBucket);
        }
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(UploadError::MissingCredentials(ENDPOINT_ENV))?;
        let token = self
            .token
            .as_deref()
            .ok_or(UploadError::MissingCredentials(TOKEN_ENV))?;

        let body = tokio::fs::read(local_path)
            .await
            .map_err(|source| UploadError::Io {
                path: local_path.display().to_string(),
                source,
            })?;

        let url = Self::object_url(endpoint, bucket, key);
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UploadError::Rejected {
                status: response.status().as_u16(),
            });
        }
        info!(%url, "upload complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use tempfile::tempdir;

    #[test]
    fn test_csv_sink_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ktc.csv");

        let mut table = Table::new(vec!["Updated 10/15/26 at 03:04pm".into(), "Team".into(), "Value".into()]);
        table
            .push_row(vec![Cell::text("Chase, Ja'Marr"), Cell::Empty, Cell::Float(999.5)])
            .unwrap();

        CsvSink::new(&path).write(&table).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            ["Updated 10/15/26 at 03:04pm,Team,Value", "\"Chase, Ja'Marr\",,999.5"]
        );
    }

    #[test]
    fn test_object_url() {
        assert_eq!(
            HttpObjectStore::object_url("https://store.test/", "bucket", "ktc.csv"),
            "https://store.test/bucket/ktc.csv"
        );
    }

    #[tokio::test]
    async fn test_upload_without_credentials() {
        let store = HttpObjectStore::new(Some("https://store.test".into()), None);
        let err = store
            .upload(Path::new("ktc.csv"), "bucket", "ktc.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::MissingCredentials(TOKEN_ENV)));

        let err = store
            .upload(Path::new("ktc.csv"), "", "ktc.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::MissingBucket));
    }
}
