use serde::{Deserialize, Serialize};
use std::fmt;

/// One normalized news item, as produced by a source reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
}

impl Article {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            date: String::new(),
            description: String::new(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Legal,
    Pedagogical,
    Professional,
}

impl Category {
    /// Declared merge order.
    pub const ALL: [Category; 3] = [Category::Legal, Category::Pedagogical, Category::Professional];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Legal => "legal",
            Category::Pedagogical => "pedagogical",
            Category::Professional => "professional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered article lists, one per category.
#[derive(Debug, Clone, Default)]
pub struct CategoryBuckets {
    pub legal: Vec<Article>,
    pub pedagogical: Vec<Article>,
    pub professional: Vec<Article>,
}

impl CategoryBuckets {
    pub fn get(&self, category: Category) -> &[Article] {
        match category {
            Category::Legal => &self.legal,
            Category::Pedagogical => &self.pedagogical,
            Category::Professional => &self.professional,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<Article> {
        match category {
            Category::Legal => &mut self.legal,
            Category::Pedagogical => &mut self.pedagogical,
            Category::Professional => &mut self.professional,
        }
    }

    pub fn len(&self) -> usize {
        self.legal.len() + self.pedagogical.len() + self.professional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of reading one source. A failure never aborts the run; callers
/// fall back to an empty list.
#[derive(Debug)]
pub enum SourceOutcome {
    Fetched(Vec<Article>),
    Failed(String),
}

impl SourceOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed(_))
    }

    pub fn into_articles(self) -> Vec<Article> {
        match self {
            SourceOutcome::Fetched(articles) => articles,
            SourceOutcome::Failed(_) => Vec::new(),
        }
    }
}

impl From<Result<Vec<Article>>> for SourceOutcome {
    fn from(result: Result<Vec<Article>>) -> Self {
        match result {
            Ok(articles) => SourceOutcome::Fetched(articles),
            Err(e) => SourceOutcome::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
