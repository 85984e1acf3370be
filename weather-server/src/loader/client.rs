//! HTTP client that registers airports with a running weather server.

use futures::future::join_all;
use tracing::{info, warn};

use super::error::LoaderError;
use super::parse::AirportRow;

/// Default collector endpoint.
const DEFAULT_BASE_URL: &str = "http://localhost:9090/collect";

/// Configuration for the loader client.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Base URL of the collector API
    pub base_url: String,
    /// Number of registrations sent concurrently
    pub batch_size: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LoaderConfig {
    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom batch size. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: 16,
            timeout_secs: 30,
        }
    }
}

/// Result of an upload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub failed: usize,
}

/// Client for the collector's airport registration endpoint.
#[derive(Debug, Clone)]
pub struct LoaderClient {
    http: reqwest::Client,
    base_url: String,
    batch_size: usize,
}

impl LoaderClient {
    /// Create a new loader client.
    pub fn new(config: LoaderConfig) -> Result<Self, LoaderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            batch_size: config.batch_size.max(1),
        })
    }

    /// URL that registers `row`.
    pub fn register_url(&self, row: &AirportRow) -> String {
        format!(
            "{}/airport/{}/{}/{}",
            self.base_url, row.iata, row.latitude, row.longitude
        )
    }

    /// Register a single airport.
    pub async fn register(&self, row: &AirportRow) -> Result<(), LoaderError> {
        let response = self.http.post(self.register_url(row)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoaderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }

    /// Register every row, `batch_size` requests at a time.
    ///
    /// Failures are logged and counted; they do not stop the run.
    pub async fn upload_all(&self, rows: &[AirportRow]) -> UploadSummary {
        let mut summary = UploadSummary::default();

        for batch in rows.chunks(self.batch_size) {
            let futures: Vec<_> = batch
                .iter()
                .map(|row| async move { (row, self.register(row).await) })
                .collect();

            for (row, result) in join_all(futures).await {
                match result {
                    Ok(()) => summary.uploaded += 1,
                    Err(e) => {
                        warn!(iata = %row.iata, error = %e, "Failed to register airport");
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(
            uploaded = summary.uploaded,
            failed = summary.failed,
            "Airport upload complete"
        );
        summary
    }
}
