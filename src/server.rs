//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, cache selection, service wiring and
//! the Axum server lifecycle.

use crate::application::services::SitemapSettings;
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::persistence::{
    PgAdvertisementRepository, PgClassificationRepository, PgDomainRepository,
    PgLocationRepository,
};
use crate::infrastructure::rendering::AskamaSitemapRenderer;
use crate::infrastructure::routing::PathUrlGenerator;
use crate::routes::app_router;
use crate::state::{AppState, Collaborators};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .acquire_timeout(config.pool.acquire_timeout)
        .idle_timeout(config.pool.idle_timeout)
        .max_lifetime(config.pool.max_lifetime)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Picks Redis when configured and reachable, the in-process cache otherwise.
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.sitemap_cache_ttl).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-process cache.", e);
            }
        }
    } else {
        tracing::info!("Cache enabled (in-process)");
    }

    Arc::new(MemoryCache::new(config.sitemap_cache_ttl))
}

/// Wires PostgreSQL repositories, the cache and the renderers into [`AppState`].
///
/// # Errors
///
/// Returns an error if `PUBLIC_BASE_URL` cannot be used as a URL base.
pub fn build_state(config: &Config, pool: PgPool, cache: Arc<dyn CacheService>) -> Result<AppState> {
    let pool = Arc::new(pool);
    let url_generator =
        PathUrlGenerator::new(&config.public_base_url).context("Invalid PUBLIC_BASE_URL")?;

    let collaborators = Collaborators {
        domains: Arc::new(PgDomainRepository::new(pool.clone())),
        locations: Arc::new(PgLocationRepository::new(pool.clone())),
        classifications: Arc::new(PgClassificationRepository::new(pool.clone())),
        advertisements: Arc::new(PgAdvertisementRepository::new(pool)),
        cache,
        url_generator: Arc::new(url_generator),
        renderer: Arc::new(AskamaSitemapRenderer),
    };

    let settings = SitemapSettings {
        cache_ttl_seconds: config.sitemap_cache_ttl,
        batch_size: config.sitemap_batch_size,
        ..SitemapSettings::default()
    };

    Ok(AppState::new(
        collaborators,
        settings,
        config.breadcrumbs_max_age,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = connect_cache(&config).await;
    let state = build_state(&config, pool, cache)?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
