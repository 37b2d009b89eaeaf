use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinesync_core::{
    load_config, validate_config, validate_linker_config, Config, Enricher, GenreLinker,
    MetadataProvider, NotionClient, PageDatabase, Reconciler, ReconcilerConfig, SanitizedConfig,
    TmdbClient,
};

#[derive(Parser)]
#[command(name = "cinesync", version, about = "Fill missing movie metadata from TMDB into a Notion database")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill missing fields on incomplete movie records from TMDB.
    Enrich,
    /// Link genre tags on movie records to the genres database.
    LinkGenres,
    /// Run enrichment, then genre linking.
    All,
}

// The whole job is sequential by design; the runtime is single-threaded.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;
    if matches!(cli.command, Command::LinkGenres | Command::All) {
        validate_linker_config(&config).context("Configuration validation failed")?;
    }

    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let notion: Arc<dyn PageDatabase> = Arc::new(
        NotionClient::new(config.notion.api_key.clone(), config.notion.base_url.clone())
            .context("Failed to create Notion client")?,
    );

    match cli.command {
        Command::Enrich => {
            enrich(&config, notion).await?;
        }
        Command::LinkGenres => {
            link_genres(&config, notion).await?;
        }
        Command::All => {
            enrich(&config, notion.clone()).await?;
            link_genres(&config, notion).await?;
        }
    }

    Ok(())
}

async fn enrich(config: &Config, notion: Arc<dyn PageDatabase>) -> Result<()> {
    let provider: Arc<dyn MetadataProvider> = Arc::new(
        TmdbClient::new(config.tmdb.api_key.clone(), config.tmdb.base_url.clone())
            .context("Failed to create TMDB client")?,
    );

    let reconciler_config = ReconcilerConfig {
        studio_field: config.schema.studio_field,
        image_base_url: config
            .tmdb
            .image_base_url
            .clone()
            .unwrap_or_else(|| cinesync_core::tmdb::DEFAULT_IMAGE_BASE_URL.to_string()),
    };

    let enricher = Enricher::new(
        notion,
        provider,
        Reconciler::new(reconciler_config),
        config.notion.movies_database_id.clone(),
        Duration::from_millis(config.pacing.enrich_delay_ms),
    );

    let summary = enricher.run().await.context("Enrichment batch failed")?;
    info!(
        "Enrichment summary: found={} updated={} skipped={} failed={}",
        summary.found, summary.updated, summary.skipped, summary.failed
    );
    Ok(())
}

async fn link_genres(config: &Config, notion: Arc<dyn PageDatabase>) -> Result<()> {
    let linker = GenreLinker::new(
        notion,
        config.notion.movies_database_id.clone(),
        config.notion.genres_database_id.clone(),
        Duration::from_millis(config.pacing.link_delay_ms),
        Duration::from_millis(config.pacing.retry_delay_ms),
    );

    let summary = linker.run().await.context("Genre linking batch failed")?;
    info!(
        "Genre linking summary: scanned={} linked={} skipped={} unmatched={} failed={}",
        summary.scanned, summary.linked, summary.skipped, summary.unmatched, summary.failed
    );
    Ok(())
}
