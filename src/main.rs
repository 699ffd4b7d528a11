use anyhow::{Context, Result};
use article_api::config::{AppConfig, StorageBackend};
use article_api::core::service::ArticleService;
use article_api::server::ServerBuilder;
use article_api::storage::{InMemoryArticleService, seed_articles};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Article CRUD REST API
#[derive(Debug, Parser)]
#[command(name = "article-api", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "ARTICLE_API_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides `server.bind`
    #[arg(short, long)]
    bind: Option<String>,

    /// Seed this many random articles at startup
    #[arg(long)]
    seed: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(count) = cli.seed {
        config.fixtures.enabled = true;
        config.fixtures.count = count;
    }

    if config.auth.tokens.is_empty() {
        tracing::warn!("No auth tokens configured; create, update and delete will be refused");
    }

    let articles = open_storage(&config).await?;
    tracing::info!(backend = ?config.storage.backend, "storage ready");

    if config.fixtures.enabled {
        seed_articles(articles.as_ref(), config.fixtures.count).await?;
    }

    ServerBuilder::from_config(&config)
        .with_article_service_arc(articles)
        .serve(&config.server.bind)
        .await
}

async fn open_storage(config: &AppConfig) -> Result<Arc<dyn ArticleService>> {
    match config.storage.backend {
        StorageBackend::InMemory => Ok(Arc::new(InMemoryArticleService::new())),
        StorageBackend::Postgres => open_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn open_postgres(config: &AppConfig) -> Result<Arc<dyn ArticleService>> {
    use article_api::storage::PostgresArticleService;

    let url = config
        .storage
        .database_url
        .as_deref()
        .context("storage.database_url is required by the postgres backend")?;

    let service = PostgresArticleService::connect(url).await?;
    service.ensure_schema().await?;
    tracing::info!("Database schema ready");

    Ok(Arc::new(service))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_config: &AppConfig) -> Result<Arc<dyn ArticleService>> {
    anyhow::bail!("the postgres backend requires building with `--features postgres`")
}
