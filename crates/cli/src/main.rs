use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rewatch_core::sink::write_json;
use rewatch_core::{
    load_config, validate_config, DownloadSource, DownloadStats, EntrySink, HistoryImporter,
    JsonFileSink, MetadataCatalog, Normalizer, RealDebridClient, SanitizedConfig, TitleResolver,
    TmdbClient,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("rewatch {}", VERSION);

    // Determine config path
    let config_path = std::env::var("REWATCH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    let sanitized = serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default();
    info!("Effective configuration: {}", sanitized);

    // Fetch download history
    let source = RealDebridClient::new(config.real_debrid.clone())
        .context("Failed to create Real-Debrid client")?;
    let downloads = source
        .fetch_downloads()
        .await
        .context("Failed to fetch download history")?;

    let stats = DownloadStats::from_downloads(&downloads);
    info!(
        "Download history: {} downloads, {:.2} GiB",
        stats.total_downloads,
        stats.total_gib()
    );
    for (status, count) in &stats.status_counts {
        info!("  {}: {}", status, count);
    }

    if let Some(path) = &config.output.downloads_path {
        write_json(path, &downloads)
            .await
            .with_context(|| format!("Failed to write downloads to {:?}", path))?;
        info!("Saved download history to {:?}", path);
    }

    // Resolve titles
    let catalog: Arc<dyn MetadataCatalog> =
        Arc::new(TmdbClient::new(config.tmdb.clone()).context("Failed to create TMDB client")?);
    let pacing = Duration::from_millis(config.resolver.pacing_ms);
    let resolver = TitleResolver::new(catalog, config.resolver.clone());
    let normalizer = Normalizer::new(config.normalizer.clone());
    let mut importer = HistoryImporter::new(normalizer, resolver, pacing);

    let output = importer.resolve_all(&downloads).await;
    let summary = output.summary;
    info!(
        "Processed {} records: {} resolved, {} not found, {} skipped (empty), {} skipped (unusable), {} cache hits",
        summary.processed,
        summary.resolved,
        summary.unresolved,
        summary.skipped_empty,
        summary.skipped_unusable,
        summary.cache_hits
    );
    let cache = importer.resolver().cache_stats();
    info!(
        "Resolver cache: {} titles, {} hits, {} misses",
        importer.resolver().cache_len(),
        cache.hits,
        cache.misses
    );

    if output.entries.is_empty() {
        bail!("No titles could be resolved, nothing to import");
    }

    // Write import file
    let output_path = config.output.path.clone().unwrap_or_else(default_output_path);
    let sink = JsonFileSink::new(output_path);
    sink.write_entries(&output.entries)
        .await
        .with_context(|| format!("Failed to write import file {:?}", sink.path()))?;

    info!(
        "Import file ready: {:?} ({} entries)",
        sink.path(),
        output.entries.len()
    );
    Ok(())
}

/// `trakt_import_YYYYMMDD_HHMMSS.json` in the working directory.
fn default_output_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("trakt_import_{}.json", stamp))
}
