use crate::config::{is_remote_location, FetchConfig};
use crate::types::{AggregatorError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Retrieves raw source content, either over HTTP or from the local disk.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the body behind a source identifier.
    ///
    /// `http://` and `https://` identifiers go through the HTTP client with the
    /// configured timeout; anything else is read as a file path.
    pub async fn fetch(&self, location: &str) -> Result<String> {
        if is_remote_location(location) {
            self.fetch_remote(location).await
        } else {
            self.read_local(location).await
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AggregatorError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content = response.text().await?;
        info!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }

    async fn read_local(&self, path: &str) -> Result<String> {
        debug!("Reading local source {}", path);
        let content = tokio::fs::read_to_string(path).await?;
        Ok(content)
    }
}
