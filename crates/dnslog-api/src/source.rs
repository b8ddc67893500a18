//! Where the dataset is loaded from.

use async_trait::async_trait;
use dnslog_core::{Dataset, DnsLogError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Timeout for fetching a remote dataset.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// A location the dataset can be read from once at startup.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch and parse the dataset.
    async fn load(&self) -> Result<Dataset>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;
}

/// CSV served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn load(&self) -> Result<Dataset> {
        debug!(url = %self.url, "fetching dataset");

        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DnsLogError::Source(e.to_string()))?;

        let response = http
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DnsLogError::Source(format!("{}: {e}", self.url)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| DnsLogError::Source(format!("{}: {e}", self.url)))?;

        Dataset::from_csv_reader(body.as_ref())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV file on local disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn load(&self) -> Result<Dataset> {
        debug!(path = %self.path.display(), "reading dataset");
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DnsLogError::Source(format!("{}: {e}", self.path.display())))?;
        Dataset::from_csv_reader(content.as_slice())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source for a configured location.
pub fn from_location(location: &str) -> Box<dyn DatasetSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CSV: &str = ",IP,Bytes\n0,1.1.1.1,50000\n1,2.2.2.2,200000\n";

    #[test]
    fn test_from_location_picks_source() {
        assert_eq!(from_location("https://example.com/logs.csv").describe(), "https://example.com/logs.csv");
        assert_eq!(from_location("data/logs.csv").describe(), "data/logs.csv");
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let dataset = FileSource::new(file.path()).load().await.unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let err = FileSource::new("/nonexistent/logs.csv").load().await.unwrap_err();
        assert!(matches!(err, DnsLogError::Source(_)));
    }

    #[tokio::test]
    async fn test_http_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CSV))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/logs.csv", server.uri()));
        let dataset = source.load().await.unwrap();
        assert_eq!(dataset.unique_ips().uniqueips, vec!["1.1.1.1", "2.2.2.2"]);
    }

    #[tokio::test]
    async fn test_http_error_status_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = HttpSource::new(format!("{}/missing.csv", server.uri()))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, DnsLogError::Source(_)));
    }

    #[tokio::test]
    async fn test_http_malformed_csv_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not csv</html>"))
            .mount(&server)
            .await;

        let err = HttpSource::new(server.uri()).load().await.unwrap_err();
        assert!(matches!(err, DnsLogError::MissingColumn(_)));
    }
}
