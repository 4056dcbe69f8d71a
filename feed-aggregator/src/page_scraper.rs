//! HTML listing scraper for sites that publish news without a feed.
//!
//! A listing page is a sequence of item blocks, each holding a title anchor,
//! an optional `<time datetime="...">` and an optional summary paragraph. The
//! CSS selectors for those parts are configurable per source.

use crate::types::{AggregatorError, Article, Result};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeSelectors {
    pub item: String,
    /// Anchor whose text is the title and whose `href` is the link.
    pub title: String,
    /// Element carrying a `datetime` attribute.
    pub date: String,
    pub description: String,
}

impl Default for ScrapeSelectors {
    fn default() -> Self {
        Self {
            item: "article.teaser".to_string(),
            title: "h2.teaser_title a".to_string(),
            date: "time.teaser_date".to_string(),
            description: "p.teaser_desc".to_string(),
        }
    }
}

struct CompiledSelectors {
    item: Selector,
    title: Selector,
    date: Selector,
    description: Selector,
}

impl CompiledSelectors {
    fn compile(selectors: &ScrapeSelectors) -> Result<Self> {
        Ok(Self {
            item: compile_one(&selectors.item)?,
            title: compile_one(&selectors.title)?,
            date: compile_one(&selectors.date)?,
            description: compile_one(&selectors.description)?,
        })
    }
}

fn compile_one(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| AggregatorError::Parse(format!("Invalid selector '{}': {:?}", selector, e)))
}

pub struct PageScraper {
    selectors: CompiledSelectors,
}

impl PageScraper {
    pub fn new(selectors: &ScrapeSelectors) -> Result<Self> {
        Ok(Self {
            selectors: CompiledSelectors::compile(selectors)?,
        })
    }

    /// Extract articles from a listing page fetched from `page_url`.
    ///
    /// Relative links are resolved against `page_url`. Items without a title
    /// anchor are skipped.
    pub fn parse_listing(&self, html: &str, page_url: &str) -> Result<Vec<Article>> {
        let base = Url::parse(page_url)?;
        let document = Html::parse_document(html);

        let mut articles = Vec::new();
        for item in document.select(&self.selectors.item) {
            let Some(anchor) = item.select(&self.selectors.title).next() else {
                debug!("Skipping listing item without title on {}", page_url);
                continue;
            };

            let link = anchor
                .value()
                .attr("href")
                .map(|href| resolve_link(&base, href))
                .unwrap_or_default();

            let date = item
                .select(&self.selectors.date)
                .next()
                .and_then(|el| el.value().attr("datetime"))
                .map(|d| d.trim().to_string())
                .unwrap_or_default();

            let description = item
                .select(&self.selectors.description)
                .next()
                .map(element_text)
                .unwrap_or_default();

            articles.push(Article {
                title: element_text(anchor),
                link,
                date,
                description,
                source: page_url.to_string(),
            });
        }

        Ok(articles)
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_link(base: &Url, href: &str) -> String {
    let href = href.trim();
    match base.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}
