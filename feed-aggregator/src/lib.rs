pub mod types;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod page_scraper;
pub mod traits;
pub mod sources;
pub mod aggregator;
pub mod renderer;
pub mod manifest;
pub mod event_log;
pub mod local_layer;
pub mod pipeline;
pub mod rss_utils;

pub use types::*;
pub use config::{Config, FetchConfig, SourceKind, SourceSpec};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use traits::PullFeed;
pub use sources::{RssFeedSource, ScrapedPageSource};
pub use aggregator::{aggregate, AggregatedFeeds};
pub use renderer::{parse_or_passthrough, FeedRenderer};
pub use manifest::Manifest;
pub use event_log::EventLog;
pub use pipeline::{AggregationPipeline, RunSummary};
