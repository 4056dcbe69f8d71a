use crate::config::is_remote_location;
use crate::rss_utils::url::extract_domain;
use crate::traits::PullFeed;
use crate::types::{Article, Result};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// RSS or Atom feed read from a URL or a local file
pub struct RssFeedSource {
    pub location: String,
    pub label: Option<String>,
    fetcher: Arc<Fetcher>,
    parser: FeedParser,
}

impl RssFeedSource {
    pub fn new(location: String, fetcher: Arc<Fetcher>) -> Self {
        Self {
            location,
            label: None,
            fetcher,
            parser: FeedParser::new(),
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }
}

#[async_trait]
impl PullFeed for RssFeedSource {
    fn source_id(&self) -> String {
        self.location.clone()
    }

    fn source_name(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            // Domain name from URL as fallback
            match extract_domain(&self.location) {
                Some(domain) => format!("RSS Feed ({})", domain),
                None => format!("RSS Feed ({})", self.location),
            }
        })
    }

    fn is_remote(&self) -> bool {
        is_remote_location(&self.location)
    }

    async fn pull(&self) -> Result<Vec<Article>> {
        info!("Pulling RSS feed: {}", self.location);

        let content = self.fetcher.fetch(&self.location).await?;
        let articles = self.parser.parse_feed(&content, &self.location)?;

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use std::io::Write;

    fn fetcher() -> Arc<Fetcher> {
        Arc::new(Fetcher::new(FetchConfig::default()).unwrap())
    }

    #[test]
    fn test_source_name_fallbacks() {
        let source = RssFeedSource::new("https://www.digiforma.com/feed/".to_string(), fetcher());
        assert_eq!(source.source_name(), "RSS Feed (www.digiforma.com)");
        assert!(source.is_remote());

        let labelled = RssFeedSource::new("feeds/local.xml".to_string(), fetcher())
            .with_label(Some("Local".to_string()));
        assert_eq!(labelled.source_name(), "Local");
        assert!(!labelled.is_remote());
    }

    #[tokio::test]
    async fn test_pull_local_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<rss version="2.0"><channel><title>t</title><link>https://x.fr</link><description>d</description>
<item><title>One</title><link>https://x.fr/1</link></item></channel></rss>"#
        )
        .unwrap();
        let location = file.path().to_str().unwrap().to_string();

        let source = RssFeedSource::new(location.clone(), fetcher());
        let articles = source.pull().await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "One");
        assert_eq!(articles[0].source, location);
    }
}
