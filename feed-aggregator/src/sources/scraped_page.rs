use crate::config::is_remote_location;
use crate::page_scraper::{PageScraper, ScrapeSelectors};
use crate::rss_utils::url::extract_domain;
use crate::traits::PullFeed;
use crate::types::{Article, Result};
use crate::Fetcher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// News listing scraped from an HTML page
pub struct ScrapedPageSource {
    pub url: String,
    pub label: Option<String>,
    selectors: ScrapeSelectors,
    fetcher: Arc<Fetcher>,
}

impl ScrapedPageSource {
    pub fn new(url: String, selectors: ScrapeSelectors, fetcher: Arc<Fetcher>) -> Self {
        Self {
            url,
            label: None,
            selectors,
            fetcher,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }
}

#[async_trait]
impl PullFeed for ScrapedPageSource {
    fn source_id(&self) -> String {
        self.url.clone()
    }

    fn source_name(&self) -> String {
        self.label.clone().unwrap_or_else(|| match extract_domain(&self.url) {
            Some(domain) => format!("Web page ({})", domain),
            None => format!("Web page ({})", self.url),
        })
    }

    fn is_remote(&self) -> bool {
        is_remote_location(&self.url)
    }

    async fn pull(&self) -> Result<Vec<Article>> {
        info!("Scraping page: {}", self.url);

        let html = self.fetcher.fetch(&self.url).await?;

        PageScraper::new(&self.selectors)?.parse_listing(&html, &self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::types::AggregatorError;

    #[tokio::test]
    async fn test_relative_location_cannot_resolve_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.html");
        std::fs::write(
            &path,
            r#"<article class="teaser"><h2 class="teaser_title"><a href="/a">A</a></h2></article>"#,
        )
        .unwrap();

        let fetcher = Arc::new(Fetcher::new(FetchConfig::default()).unwrap());
        let source = ScrapedPageSource::new(
            path.to_str().unwrap().to_string(),
            ScrapeSelectors::default(),
            fetcher,
        );

        // A file path is not a base URL, so links cannot be made absolute
        let err = source.pull().await.unwrap_err();
        assert!(matches!(err, AggregatorError::InvalidUrl(_)));
        assert!(!source.is_remote());
        assert!(source.source_name().starts_with("Web page ("));
    }
}
