//! data.gov.in API client with offline fallback
//!
//! Fetches MGNREGA district records from the data.gov.in resource endpoint
//! and resolves a dataset through a three-tier fallback: remote API first,
//! then the on-disk cache, then the sample data bundled with the binary.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::{Dataset, RawRecord, Record, SourceKind};
use crate::cache::CacheManager;

/// Fixed data.gov.in resource endpoint for MGNREGA district statistics
const DATA_GOV_URL: &str =
    "https://api.data.gov.in/resource/1d369aae-155a-4cc8-b7a8-04d4cd5ec2a6?format=json&limit=1000";

/// Cache key under which the last fetched dataset is persisted
const DATASET_CACHE_KEY: &str = "mgnrega_data";

/// Upper bound on how long a remote fetch may take
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sample dataset shipped with the binary, used when both the remote API
/// and the cache are unavailable
const SAMPLE_DATA: &str = include_str!("../../assets/sample-data.json");

/// Errors that can occur while resolving a dataset
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API returned status {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Failed to parse a response body or the bundled sample
    #[error("Failed to parse records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level response shape shared by the API and the bundled sample
///
/// Anything without a `records` array is a parse failure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    records: Vec<RawRecord>,
}

/// Client for resolving a district dataset with offline fallback
#[derive(Debug, Clone)]
pub struct DataClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache manager for persisting responses
    cache_manager: Option<CacheManager>,
    /// Endpoint URL (allows override for testing)
    base_url: String,
}

impl DataClient {
    /// Creates a new DataClient with default configuration
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            cache_manager: CacheManager::new(),
            base_url: DATA_GOV_URL.to_string(),
        }
    }

    /// Creates a new DataClient with a custom cache manager
    pub fn with_cache(cache_manager: CacheManager) -> Self {
        Self {
            http_client: Client::new(),
            cache_manager: Some(cache_manager),
            base_url: DATA_GOV_URL.to_string(),
        }
    }

    /// Overrides the endpoint URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolves a dataset, trying the remote API, then the cache, then the
    /// bundled sample data.
    ///
    /// # Behavior
    /// - On a successful fetch the dataset is persisted to the cache
    ///   (replacing any previous entry) and tagged `SourceKind::Remote`.
    /// - On any fetch failure the cache is read; a hit is tagged
    ///   `SourceKind::Cache` with `fetched_at` set to when it was cached.
    ///   The cache is never rewritten on this path.
    /// - With no cache entry the bundled sample is parsed and tagged
    ///   `SourceKind::Bundled`.
    ///
    /// # Errors
    /// Only the final tier can fail: an unparseable bundled sample means
    /// no dataset can be shown at all.
    pub async fn resolve(&self) -> Result<Dataset, DataError> {
        match self.fetch_remote().await {
            Ok(dataset) => {
                if let Some(ref cache_manager) = self.cache_manager {
                    if let Err(e) = cache_manager.write(DATASET_CACHE_KEY, &dataset.records) {
                        warn!(error = %e, "failed to persist dataset to cache");
                    }
                }
                debug!(records = dataset.records.len(), "fetched dataset from API");
                Ok(dataset)
            }
            Err(api_error) => {
                warn!(error = %api_error, "API fetch failed, falling back to cache");
                if let Some(ref cache_manager) = self.cache_manager {
                    if let Some(cached) = cache_manager.read::<Vec<Record>>(DATASET_CACHE_KEY) {
                        debug!(records = cached.data.len(), "serving dataset from cache");
                        return Ok(Dataset {
                            records: cached.data,
                            fetched_at: cached.cached_at,
                            source: SourceKind::Cache,
                        });
                    }
                }
                warn!("no cached dataset, falling back to bundled sample data");
                load_bundled()
            }
        }
    }

    /// Fetches and validates a dataset directly from the API
    async fn fetch_remote(&self) -> Result<Dataset, DataError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus(status));
        }

        let text = response.text().await?;
        let api_response: ApiResponse = serde_json::from_str(&text)?;

        Ok(Dataset::from_raw(
            api_response.records,
            Utc::now(),
            SourceKind::Remote,
        ))
    }
}

impl Default for DataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the bundled sample data into a dataset
fn load_bundled() -> Result<Dataset, DataError> {
    let api_response: ApiResponse = serde_json::from_str(SAMPLE_DATA)?;
    Ok(Dataset::from_raw(
        api_response.records,
        Utc::now(),
        SourceKind::Bundled,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Endpoint that always fails to connect
    const UNREACHABLE_URL: &str = "http://127.0.0.1:9/records";

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    fn sample_record(district: &str, jobs_created: u64) -> Record {
        Record {
            district: district.to_string(),
            state: "Uttar Pradesh".to_string(),
            total_workers: 5000,
            total_funds: 1200000.0,
            jobs_created,
            trend: [100, 200, 300, 400, 500, 600],
        }
    }

    #[test]
    fn test_bundled_sample_parses() {
        let dataset = load_bundled().expect("Bundled sample must parse");
        assert_eq!(dataset.source, SourceKind::Bundled);
        assert!(!dataset.records.is_empty(), "Sample data should have records");
    }

    #[test]
    fn test_bundled_sample_records_are_all_valid() {
        let api_response: ApiResponse =
            serde_json::from_str(SAMPLE_DATA).expect("Bundled sample must parse");
        let raw_count = api_response.records.len();
        let dataset = load_bundled().unwrap();
        assert_eq!(
            dataset.records.len(),
            raw_count,
            "No bundled record should be dropped by validation"
        );
    }

    /// Serves a single canned HTTP response on an ephemeral port
    async fn serve_once(status_line: &str, body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let status_line = status_line.to_string();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{}/records", addr)
    }

    #[tokio::test]
    async fn test_resolve_remote_success_persists_cache() {
        let (cache, _temp_dir) = create_test_cache();
        let body = serde_json::json!({
            "records": [{
                "district": "Kanpur",
                "state": "Uttar Pradesh",
                "total_workers": 5000,
                "total_funds": 1200000.0,
                "jobs_created": 120,
                "trend": [100, 200, 300, 400, 500, 600]
            }]
        })
        .to_string();
        let url = serve_once("HTTP/1.1 200 OK", body).await;

        let client = DataClient::with_cache(cache.clone()).with_base_url(url);
        let dataset = client.resolve().await.expect("Remote fetch should succeed");

        assert_eq!(dataset.source, SourceKind::Remote);
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].district, "Kanpur");

        let cached = cache
            .read::<Vec<Record>>(DATASET_CACHE_KEY)
            .expect("Cache was written");
        assert_eq!(cached.data, dataset.records);
    }

    #[tokio::test]
    async fn test_resolve_http_error_falls_back() {
        let (cache, _temp_dir) = create_test_cache();
        let records = vec![sample_record("Agra", 70)];
        cache.write(DATASET_CACHE_KEY, &records).unwrap();

        let url = serve_once("HTTP/1.1 500 Internal Server Error", String::new()).await;
        let client = DataClient::with_cache(cache).with_base_url(url);
        let dataset = client.resolve().await.unwrap();

        assert_eq!(dataset.source, SourceKind::Cache);
        assert_eq!(dataset.records, records);
    }

    #[tokio::test]
    async fn test_resolve_malformed_body_falls_back() {
        let (cache, _temp_dir) = create_test_cache();
        let records = vec![sample_record("Patna", 40)];
        cache.write(DATASET_CACHE_KEY, &records).unwrap();

        // Valid JSON, but not the expected `records` shape
        let url = serve_once("HTTP/1.1 200 OK", "{\"rows\": []}".to_string()).await;
        let client = DataClient::with_cache(cache).with_base_url(url);
        let dataset = client.resolve().await.unwrap();

        assert_eq!(dataset.source, SourceKind::Cache);
        assert_eq!(dataset.records, records);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_cache_when_api_unreachable() {
        let (cache, _temp_dir) = create_test_cache();
        let records = vec![sample_record("Kanpur", 120), sample_record("Agra", 80)];
        cache.write(DATASET_CACHE_KEY, &records).unwrap();

        let client = DataClient::with_cache(cache).with_base_url(UNREACHABLE_URL);
        let dataset = client.resolve().await.expect("Cache fallback should succeed");

        assert_eq!(dataset.source, SourceKind::Cache);
        assert_eq!(dataset.records, records);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_bundled_when_no_cache() {
        let (cache, _temp_dir) = create_test_cache();

        let client = DataClient::with_cache(cache).with_base_url(UNREACHABLE_URL);
        let dataset = client.resolve().await.expect("Bundled fallback should succeed");

        assert_eq!(dataset.source, SourceKind::Bundled);
        assert!(!dataset.records.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_does_not_overwrite_cache() {
        let (cache, _temp_dir) = create_test_cache();
        let records = vec![sample_record("Varanasi", 300)];
        cache.write(DATASET_CACHE_KEY, &records).unwrap();
        let before = cache
            .read::<Vec<Record>>(DATASET_CACHE_KEY)
            .expect("Entry exists");

        let client = DataClient::with_cache(cache.clone()).with_base_url(UNREACHABLE_URL);
        let _ = client.resolve().await.unwrap();

        let after = cache
            .read::<Vec<Record>>(DATASET_CACHE_KEY)
            .expect("Entry still exists");
        assert_eq!(after.data, before.data);
        assert_eq!(after.cached_at, before.cached_at);
    }

    #[tokio::test]
    async fn test_cached_dataset_keeps_original_fetch_time() {
        let (cache, _temp_dir) = create_test_cache();
        let records = vec![sample_record("Lucknow", 50)];
        cache.write(DATASET_CACHE_KEY, &records).unwrap();
        let cached_at = cache
            .read::<Vec<Record>>(DATASET_CACHE_KEY)
            .unwrap()
            .cached_at;

        let client = DataClient::with_cache(cache).with_base_url(UNREACHABLE_URL);
        let dataset = client.resolve().await.unwrap();

        assert_eq!(dataset.fetched_at, cached_at);
    }

    #[tokio::test]
    async fn test_resolve_without_cache_manager_uses_bundled() {
        let mut client = DataClient::new().with_base_url(UNREACHABLE_URL);
        client.cache_manager = None;

        let dataset = client.resolve().await.expect("Bundled fallback should succeed");
        assert_eq!(dataset.source, SourceKind::Bundled);
    }
}
