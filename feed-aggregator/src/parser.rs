use crate::types::{AggregatorError, Article, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use feed_rs::parser;
use tracing::debug;

/// Turns RSS/Atom documents into [`Article`] records.
#[derive(Debug, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_feed(&self, content: &str, source: &str) -> Result<Vec<Article>> {
        debug!("Parsing feed content ({} bytes) from {}", content.len(), source);

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let articles: Vec<Article> = feed
            .entries
            .into_iter()
            .map(|entry| self.parse_entry(entry, source))
            .collect();

        debug!("Parsed {} entries from {}", articles.len(), source);
        Ok(articles)
    }

    fn parse_entry(&self, entry: feed_rs::model::Entry, source: &str) -> Article {
        let title = entry.title.map(|t| t.content).unwrap_or_default();
        let link = entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default();

        // Published wins over updated
        let date = entry
            .published
            .or(entry.updated)
            .map(format_iso)
            .unwrap_or_default();

        let description = entry.summary.map(|s| s.content).unwrap_or_default();

        Article {
            title,
            link,
            date,
            description,
            source: source.to_string(),
        }
    }
}

/// ISO-8601 UTC with a trailing `Z`, which keeps dates from different feeds
/// comparable as plain strings.
pub fn format_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Legal news</title>
    <link>https://example.gouv.fr/</link>
    <description>Test channel</description>
    <item>
      <title>Reform &amp; training</title>
      <link>https://example.gouv.fr/a</link>
      <description>About the reform</description>
      <pubDate>Fri, 01 Mar 2024 10:00:00 GMT</pubDate>
    </item>
    <item>
      <link>https://example.gouv.fr/b</link>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Pedagogy</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
  <updated>2024-02-10T08:30:00Z</updated>
  <entry>
    <title>Blended learning</title>
    <link href="https://blog.example.com/blended"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2024-02-10T08:30:00Z</updated>
    <summary>Mixing formats</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_entries() {
        let articles = FeedParser::new().parse_feed(RSS, "fixtures/legal.xml").unwrap();
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Reform & training");
        assert_eq!(first.link, "https://example.gouv.fr/a");
        assert_eq!(first.date, "2024-03-01T10:00:00Z");
        assert_eq!(first.description, "About the reform");
        assert_eq!(first.source, "fixtures/legal.xml");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let articles = FeedParser::new().parse_feed(RSS, "fixtures/legal.xml").unwrap();
        let second = &articles[1];
        assert_eq!(second.link, "https://example.gouv.fr/b");
        assert_eq!(second.title, "");
        assert_eq!(second.date, "");
        assert_eq!(second.description, "");
    }

    #[test]
    fn test_atom_falls_back_to_updated() {
        let articles = FeedParser::new().parse_feed(ATOM, "https://blog.example.com/feed").unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].date, "2024-02-10T08:30:00Z");
        assert_eq!(articles[0].description, "Mixing formats");
        assert_eq!(articles[0].link, "https://blog.example.com/blended");
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = FeedParser::new().parse_feed("this is not xml", "x").unwrap_err();
        assert!(matches!(err, AggregatorError::Parse(_)));
    }
}
