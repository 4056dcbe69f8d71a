use crate::page_scraper::ScrapeSelectors;
use crate::types::{AggregatorError, Category, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one run needs. Built once at start and passed down explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub fetch: FetchConfig,
    pub channel: ChannelInfo,
    pub outputs: OutputFiles,
    pub sources: SourceLists,
    /// Optional pre-existing RSS or JSON file merged in as an extra source.
    pub local_layer: Option<PathBuf>,
    /// Category receiving the local layer when it is an RSS file.
    pub local_layer_category: Category,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("rss"),
            fetch: FetchConfig::default(),
            channel: ChannelInfo::default(),
            outputs: OutputFiles::default(),
            sources: SourceLists::default(),
            local_layer: None,
            local_layer_category: Category::Legal,
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing keys keep their defaults, except that
    /// a `sources` object replaces the built-in source lists as a whole.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AggregatorError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn category_file(&self, category: Category) -> &str {
        match category {
            Category::Legal => &self.outputs.legal,
            Category::Pedagogical => &self.outputs.pedagogical,
            Category::Professional => &self.outputs.professional,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Feed-Aggregator/1.0".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Channel-level metadata written into every generated feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl Default for ChannelInfo {
    fn default() -> Self {
        Self {
            title: "Feed Aggregator".to_string(),
            link: "https://example.org/rss/".to_string(),
            description: "Automatically generated feed".to_string(),
        }
    }
}

/// File names relative to the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub legal: String,
    pub pedagogical: String,
    pub professional: String,
    pub global: String,
    pub manifest: String,
    pub log: String,
    pub mirror_dir: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            legal: "flux_legal.xml".to_string(),
            pedagogical: "flux_pedago.xml".to_string(),
            professional: "flux_metiers.xml".to_string(),
            global: "rss_final.xml".to_string(),
            manifest: "manifest.json".to_string(),
            log: "logs.jsonl".to_string(),
            mirror_dir: "sources".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Feed,
    Scrape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub kind: SourceKind,
    /// Absolute URL or local file path.
    pub location: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub selectors: Option<ScrapeSelectors>,
}

impl SourceSpec {
    pub fn feed(location: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Feed,
            location: location.into(),
            label: None,
            selectors: None,
        }
    }

    pub fn scrape(location: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Scrape,
            location: location.into(),
            label: None,
            selectors: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_remote(&self) -> bool {
        is_remote_location(&self.location)
    }
}

pub fn is_remote_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Without a `sources` key the built-in lists apply; once the key is present,
/// a category it leaves out has no sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLists {
    #[serde(default)]
    pub legal: Vec<SourceSpec>,
    #[serde(default)]
    pub pedagogical: Vec<SourceSpec>,
    #[serde(default)]
    pub professional: Vec<SourceSpec>,
}

impl SourceLists {
    pub fn empty() -> Self {
        Self {
            legal: Vec::new(),
            pedagogical: Vec::new(),
            professional: Vec::new(),
        }
    }

    pub fn get(&self, category: Category) -> &[SourceSpec] {
        match category {
            Category::Legal => &self.legal,
            Category::Pedagogical => &self.pedagogical,
            Category::Professional => &self.professional,
        }
    }
}

impl Default for SourceLists {
    fn default() -> Self {
        Self {
            legal: vec![
                SourceSpec::feed("https://www.service-public.fr/rss/actualites.rss")
                    .with_label("Service-public.fr"),
                SourceSpec::feed("https://travail-emploi.gouv.fr/actualites.rss")
                    .with_label("Travail-emploi.gouv.fr"),
                SourceSpec::feed("https://www.economie.gouv.fr/rss/actualites")
                    .with_label("Economie.gouv.fr"),
            ],
            pedagogical: vec![
                SourceSpec::feed("https://www.digiforma.com/feed/").with_label("Digiforma"),
            ],
            professional: vec![
                SourceSpec::scrape("https://www.cosmos-sports.fr/actualites").with_label("COSMOS"),
            ],
        }
    }
}
