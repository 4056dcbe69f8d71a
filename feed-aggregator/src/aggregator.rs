use crate::types::{Article, Category, CategoryBuckets};
use std::collections::HashSet;
use tracing::{debug, info};

/// Category lists as read, plus the merged global list.
#[derive(Debug, Clone, Default)]
pub struct AggregatedFeeds {
    pub categories: CategoryBuckets,
    pub global: Vec<Article>,
}

/// Build the global list: merge in declared category order, drop repeated
/// links, newest first.
///
/// Category lists are passed through untouched; only the global list is
/// deduplicated.
pub fn aggregate(categories: CategoryBuckets) -> AggregatedFeeds {
    let merged = merge(&categories);
    let merged_count = merged.len();

    let mut global = deduplicate_by_link(merged);
    sort_by_date_desc(&mut global);

    info!(
        "Aggregated {} articles into {} unique global entries",
        merged_count,
        global.len()
    );

    AggregatedFeeds { categories, global }
}

/// Concatenate every bucket, legal first, then pedagogical, then professional.
pub fn merge(categories: &CategoryBuckets) -> Vec<Article> {
    Category::ALL
        .iter()
        .flat_map(|category| categories.get(*category).iter().cloned())
        .collect()
}

/// Keep the first article seen for each link. Articles with an empty link are
/// never treated as duplicates of each other.
pub fn deduplicate_by_link(articles: Vec<Article>) -> Vec<Article> {
    let mut seen_links = HashSet::new();
    let total = articles.len();

    let unique: Vec<Article> = articles
        .into_iter()
        .filter(|article| article.link.is_empty() || seen_links.insert(article.link.clone()))
        .collect();

    let removed_count = total - unique.len();
    if removed_count > 0 {
        debug!("Removed {} duplicate entries", removed_count);
    }

    unique
}

/// Descending by the raw `date` string. Stable, so equal dates keep their order.
pub fn sort_by_date_desc(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, link: &str, date: &str) -> Article {
        Article {
            title: title.to_string(),
            link: link.to_string(),
            date: date.to_string(),
            description: String::new(),
            source: "test".to_string(),
        }
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_merge_follows_declared_category_order() {
        let buckets = CategoryBuckets {
            legal: vec![article("l1", "a", ""), article("l2", "b", "")],
            pedagogical: vec![article("p1", "c", "")],
            professional: vec![article("m1", "d", "")],
        };
        assert_eq!(titles(&merge(&buckets)), vec!["l1", "l2", "p1", "m1"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let articles = vec![
            article("first", "https://x/1", "2024-01-01"),
            article("other", "https://x/2", "2024-01-02"),
            article("second", "https://x/1", "2024-01-03"),
        ];
        let unique = deduplicate_by_link(articles);
        assert_eq!(titles(&unique), vec!["first", "other"]);
    }

    #[test]
    fn test_empty_links_are_always_unique() {
        let articles = vec![article("a", "", ""), article("b", "", ""), article("c", "", "")];
        assert_eq!(deduplicate_by_link(articles).len(), 3);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut articles = vec![
            article("old", "1", "2023-12-31T00:00:00Z"),
            article("tie-a", "2", "2024-02-01T00:00:00Z"),
            article("undated", "3", ""),
            article("new", "4", "2024-03-01T00:00:00Z"),
            article("tie-b", "5", "2024-02-01T00:00:00Z"),
        ];
        sort_by_date_desc(&mut articles);

        assert_eq!(titles(&articles), vec!["new", "tie-a", "tie-b", "old", "undated"]);
        assert!(articles.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_categories_are_not_deduplicated() {
        let buckets = CategoryBuckets {
            legal: vec![article("a", "https://x/1", "1"), article("b", "https://x/1", "2")],
            pedagogical: vec![article("c", "https://x/1", "3")],
            professional: Vec::new(),
        };
        let feeds = aggregate(buckets);

        assert_eq!(feeds.categories.legal.len(), 2);
        assert_eq!(feeds.categories.pedagogical.len(), 1);
        assert_eq!(titles(&feeds.global), vec!["a"]);
    }

    #[test]
    fn test_empty_input() {
        let feeds = aggregate(CategoryBuckets::default());
        assert!(feeds.global.is_empty());
        assert!(feeds.categories.is_empty());
    }
}
