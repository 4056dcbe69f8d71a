use crate::types::{Article, Category, CategoryBuckets, Result};
use crate::FeedParser;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Load the optional pre-existing local layer.
///
/// A `.json` file maps category labels to article lists. Any other file is
/// read as an RSS/Atom feed whose entries all land in `feed_category`.
pub fn load_local_layer(path: &Path, feed_category: Category) -> Result<CategoryBuckets> {
    let content = std::fs::read_to_string(path)?;
    let source = path.display().to_string();

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let mut buckets = CategoryBuckets::default();
    if is_json {
        let layer: BTreeMap<Category, Vec<Article>> = serde_json::from_str(&content)?;
        for (category, articles) in layer {
            buckets
                .get_mut(category)
                .extend(articles.into_iter().map(|article| with_source(article, &source)));
        }
    } else {
        let articles = FeedParser::new().parse_feed(&content, &source)?;
        buckets.get_mut(feed_category).extend(articles);
    }

    info!("Local layer {}: {} entries found", source, buckets.len());
    Ok(buckets)
}

fn with_source(mut article: Article, source: &str) -> Article {
    if article.source.is_empty() {
        article.source = source.to_string();
    }
    article
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layer_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(
            &path,
            r#"{
                "legal": [{"title": "Decree", "link": "https://local/1", "date": "2024-01-05"}],
                "professional": [{"title": "Job board", "link": "https://local/2", "source": "intranet"}]
            }"#,
        )
        .unwrap();

        let buckets = load_local_layer(&path, Category::Legal).unwrap();
        assert_eq!(buckets.legal.len(), 1);
        assert!(buckets.pedagogical.is_empty());
        assert_eq!(buckets.legal[0].source, path.display().to_string());
        assert_eq!(buckets.legal[0].description, "");
        assert_eq!(buckets.professional[0].source, "intranet");
    }

    #[test]
    fn test_feed_layer_goes_to_configured_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.xml");
        std::fs::write(
            &path,
            r#"<rss version="2.0"><channel><title>t</title><link>https://l</link><description>d</description>
<item><title>Local</title><link>https://l/1</link></item></channel></rss>"#,
        )
        .unwrap();

        let buckets = load_local_layer(&path, Category::Pedagogical).unwrap();
        assert_eq!(buckets.pedagogical.len(), 1);
        assert_eq!(buckets.pedagogical[0].title, "Local");
        assert!(buckets.legal.is_empty());
    }

    #[test]
    fn test_missing_layer_is_an_error() {
        assert!(load_local_layer(Path::new("/nonexistent/local.json"), Category::Legal).is_err());
    }
}
