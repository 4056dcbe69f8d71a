use anyhow::Context;
use clap::Parser;
use feed_aggregator::{AggregationPipeline, Config};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fetch the configured sources once and write category feeds, a global feed,
/// a manifest and an event log.
#[derive(Debug, Parser)]
#[command(name = "feed-aggregator", version, about)]
struct Cli {
    /// JSON configuration file (defaults to the built-in source list)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving every generated file
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// User-Agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| env::var("FEED_AGGREGATOR_CONFIG").ok().map(PathBuf::from));

    let mut config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(dir) = cli
        .output_dir
        .or_else(|| env::var("FEED_AGGREGATOR_OUTPUT_DIR").ok().map(PathBuf::from))
    {
        config.output_dir = dir;
    }
    if let Some(user_agent) = cli.user_agent {
        config.fetch.user_agent = user_agent;
    }

    info!("Starting feed aggregator, writing to {}", config.output_dir.display());

    let pipeline = AggregationPipeline::new(config).context("building HTTP client")?;
    let summary = pipeline.run().await.context("aggregation run failed")?;

    for source in &summary.failed_sources {
        warn!("No articles from {}", source);
    }
    info!(
        "Feed aggregator finished: {} articles, {} files",
        summary.feeds.global.len(),
        summary.manifest.len()
    );
    Ok(())
}
