use crate::types::{Article, Result};
use async_trait::async_trait;

/// Trait for pulling articles from one configured source (feed or web page)
#[async_trait]
pub trait PullFeed: Send + Sync {
    /// Source identifier: the URL or file path it reads from
    fn source_id(&self) -> String;

    /// Human-readable name for this source
    fn source_name(&self) -> String;

    /// Whether the source lives on the network (and so gets a local mirror)
    fn is_remote(&self) -> bool;

    /// Fetch and normalize the source's current entries
    async fn pull(&self) -> Result<Vec<Article>>;
}
