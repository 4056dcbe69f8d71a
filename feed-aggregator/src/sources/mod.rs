pub mod rss_feed;
pub mod scraped_page;

pub use rss_feed::RssFeedSource;
pub use scraped_page::ScrapedPageSource;

use crate::config::{SourceKind, SourceSpec};
use crate::traits::PullFeed;
use crate::Fetcher;
use std::sync::Arc;

/// Build the reader matching a configured source.
pub fn build_source(spec: &SourceSpec, fetcher: Arc<Fetcher>) -> Box<dyn PullFeed> {
    match spec.kind {
        SourceKind::Feed => Box::new(
            RssFeedSource::new(spec.location.clone(), fetcher).with_label(spec.label.clone()),
        ),
        SourceKind::Scrape => Box::new(
            ScrapedPageSource::new(
                spec.location.clone(),
                spec.selectors.clone().unwrap_or_default(),
                fetcher,
            )
            .with_label(spec.label.clone()),
        ),
    }
}
