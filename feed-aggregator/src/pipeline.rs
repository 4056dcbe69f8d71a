use crate::aggregator::{aggregate, AggregatedFeeds};
use crate::config::Config;
use crate::event_log::EventLog;
use crate::local_layer::load_local_layer;
use crate::manifest::{Manifest, GLOBAL_KEY};
use crate::renderer::FeedRenderer;
use crate::rss_utils::url::mirror_stem;
use crate::sources::build_source;
use crate::types::{Article, Category, CategoryBuckets, Result, SourceOutcome};
use crate::Fetcher;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// What one run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub feeds: AggregatedFeeds,
    pub manifest: Manifest,
    pub failed_sources: Vec<String>,
}

/// Fetch → normalize → dedupe → sort → render, once, sources in declared order.
pub struct AggregationPipeline {
    config: Config,
    fetcher: Arc<Fetcher>,
    renderer: FeedRenderer,
    event_log: EventLog,
}

struct Collected {
    buckets: CategoryBuckets,
    mirrors: HashMap<Category, Vec<String>>,
    failed_sources: Vec<String>,
}

impl AggregationPipeline {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(config.fetch.clone())?);
        let renderer = FeedRenderer::new(config.channel.clone());
        let event_log = EventLog::new(&config.output_dir, &config.outputs.log);

        Ok(Self {
            config,
            fetcher,
            renderer,
            event_log,
        })
    }

    pub async fn run(&self) -> Result<RunSummary> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        self.event_log.record("start");

        let mut collected = self.collect_sources().await?;
        self.merge_local_layer(&mut collected);

        let feeds = aggregate(collected.buckets);
        let manifest = self.write_outputs(&feeds, &collected.mirrors)?;

        self.event_log
            .record(&format!("done: {} articles", feeds.global.len()));
        info!(
            "Run complete: {} articles in global feed, {} failed sources",
            feeds.global.len(),
            collected.failed_sources.len()
        );

        Ok(RunSummary {
            feeds,
            manifest,
            failed_sources: collected.failed_sources,
        })
    }

    async fn collect_sources(&self) -> Result<Collected> {
        let mut collected = Collected {
            buckets: CategoryBuckets::default(),
            mirrors: HashMap::new(),
            failed_sources: Vec::new(),
        };
        let mut mirror_names = MirrorNames::default();

        for category in Category::ALL {
            for spec in self.config.sources.get(category) {
                let source = build_source(spec, self.fetcher.clone());

                // Names are reserved in declared order whether or not the fetch succeeds
                let mirror = if source.is_remote() {
                    mirror_stem(&source.source_id()).map(|stem| {
                        format!("{}/{}.xml", self.config.outputs.mirror_dir, mirror_names.claim(&stem))
                    })
                } else {
                    None
                };

                let outcome: SourceOutcome = source.pull().await.into();

                let articles = match outcome {
                    SourceOutcome::Fetched(articles) => articles,
                    SourceOutcome::Failed(reason) => {
                        error!("Failed to pull from source {}: {}", source.source_id(), reason);
                        info!("{} [{}]: 0 entries found", source.source_name(), category);
                        self.event_log
                            .record(&format!("source failed: {}", source.source_id()));
                        collected.failed_sources.push(source.source_id());
                        continue;
                    }
                };

                info!("{} [{}]: {} entries found", source.source_name(), category, articles.len());

                if let Some(relative) = mirror {
                    self.renderer
                        .write_feed(&self.config.output_dir, &relative, &articles)?;
                    collected.mirrors.entry(category).or_default().push(relative);
                }

                collected.buckets.get_mut(category).extend(articles);
            }
        }

        Ok(collected)
    }

    fn merge_local_layer(&self, collected: &mut Collected) {
        let Some(path) = &self.config.local_layer else {
            return;
        };

        match load_local_layer(path, self.config.local_layer_category) {
            Ok(layer) => {
                for category in Category::ALL {
                    collected
                        .buckets
                        .get_mut(category)
                        .extend(layer.get(category).iter().cloned());
                }
            }
            Err(e) => {
                warn!("Ignoring local layer {}: {}", path.display(), e);
                self.event_log
                    .record(&format!("source failed: {}", path.display()));
                collected.failed_sources.push(path.display().to_string());
            }
        }
    }

    fn write_outputs(
        &self,
        feeds: &AggregatedFeeds,
        mirrors: &HashMap<Category, Vec<String>>,
    ) -> Result<Manifest> {
        let output_dir = &self.config.output_dir;
        let mut manifest = Manifest::new();

        for category in Category::ALL {
            let file_name = self.config.category_file(category);
            self.write_feed(file_name, feeds.categories.get(category))?;

            manifest.add(category.label(), file_name);
            for mirror in mirrors.get(&category).into_iter().flatten() {
                manifest.add(category.label(), mirror.clone());
            }
        }

        self.write_feed(&self.config.outputs.global, &feeds.global)?;
        manifest.add(GLOBAL_KEY, self.config.outputs.global.clone());

        manifest.write(output_dir, &self.config.outputs.manifest)?;
        Ok(manifest)
    }

    fn write_feed(&self, file_name: &str, articles: &[Article]) -> Result<()> {
        self.renderer
            .write_feed(&self.config.output_dir, file_name, articles)?;
        Ok(())
    }
}

/// Hands out unique mirror stems in claim order: `host`, `host_2`, `host_3`...
#[derive(Debug, Default)]
struct MirrorNames {
    claimed: HashMap<String, usize>,
}

impl MirrorNames {
    fn claim(&mut self, stem: &str) -> String {
        let count = self.claimed.entry(stem.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            stem.to_string()
        } else {
            format!("{}_{}", stem, count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_names_are_unique_in_claim_order() {
        let mut names = MirrorNames::default();
        assert_eq!(names.claim("economie_gouv_fr"), "economie_gouv_fr");
        assert_eq!(names.claim("service_public_fr"), "service_public_fr");
        assert_eq!(names.claim("economie_gouv_fr"), "economie_gouv_fr_2");
        assert_eq!(names.claim("economie_gouv_fr"), "economie_gouv_fr_3");
    }
}
