//! RSS 2.0 rendering.
//!
//! Every text value coming from a source is untrusted, so titles, links,
//! descriptions and dates are escaped before they reach the document.

use crate::config::ChannelInfo;
use crate::rss_utils::time::rfc822;
use crate::types::{Article, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Convert an ISO-8601 date to RFC-822, or hand the text back untouched.
///
/// Returns the text to emit and whether the input was understood. Naive
/// timestamps and bare dates are taken as UTC.
pub fn parse_or_passthrough(text: &str) -> (String, bool) {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return (dt.format("%a, %d %b %Y %H:%M:%S %z").to_string(), true);
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return (dt.format("%a, %d %b %Y %H:%M:%S %z").to_string(), true);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return (rfc822(naive.and_utc()), true);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return (rfc822(midnight.and_utc()), true);
        }
    }

    (text.to_string(), false)
}

pub struct FeedRenderer {
    channel: ChannelInfo,
}

impl FeedRenderer {
    pub fn new(channel: ChannelInfo) -> Self {
        Self { channel }
    }

    /// Render a complete RSS 2.0 document.
    pub fn render(&self, articles: &[Article], built_at: DateTime<Utc>) -> String {
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<rss version=\"2.0\">\n");
        xml.push_str("  <channel>\n");
        let _ = writeln!(xml, "    <title>{}</title>", escape(self.channel.title.as_str()));
        let _ = writeln!(xml, "    <link>{}</link>", escape(self.channel.link.as_str()));
        let _ = writeln!(
            xml,
            "    <description>{}</description>",
            escape(self.channel.description.as_str())
        );
        let _ = writeln!(xml, "    <lastBuildDate>{}</lastBuildDate>", rfc822(built_at));

        for article in articles {
            render_item(&mut xml, article);
        }

        xml.push_str("  </channel>\n");
        xml.push_str("</rss>\n");
        xml
    }

    /// Render and write `articles` to `dir/file_name`, replacing any previous
    /// content. Parent directories are created as needed.
    pub fn write_feed(&self, dir: &Path, file_name: &str, articles: &[Article]) -> Result<PathBuf> {
        let path = dir.join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let xml = self.render(articles, Utc::now());
        std::fs::write(&path, xml)?;

        info!("Wrote {} items to {}", articles.len(), path.display());
        Ok(path)
    }
}

fn render_item(xml: &mut String, article: &Article) {
    let (pub_date, parsed) = parse_or_passthrough(&article.date);
    if !parsed && !article.date.is_empty() {
        debug!("Keeping unparsed date '{}' for {}", article.date, article.link);
    }

    let link = escape(article.link.as_str());

    xml.push_str("    <item>\n");
    let _ = writeln!(xml, "      <title>{}</title>", escape(article.title.as_str()));
    let _ = writeln!(xml, "      <link>{}</link>", link);
    let _ = writeln!(xml, "      <guid>{}</guid>", link);
    let _ = writeln!(
        xml,
        "      <description>{}</description>",
        escape(article.description.as_str())
    );
    let _ = writeln!(xml, "      <pubDate>{}</pubDate>", escape(pub_date.as_str()));
    xml.push_str("    </item>\n");
}
