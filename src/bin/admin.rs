//! CLI administration tool for classifieds-nav.
//!
//! # Usage
//!
//! ```bash
//! # Drop every cached sitemap document
//! cargo run --bin admin -- cache invalidate
//!
//! # Print the trail of a location or a listing
//! cargo run --bin admin -- breadcrumbs springfield --host ads.example.com
//! cargo run --bin admin -- breadcrumbs springfield laptops --host ads.example.com
//!
//! # Render the root sitemap of a domain
//! cargo run --bin admin -- sitemap --host ads.example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment variables as the server (see `config`).

use classifieds_nav::application::services::BreadcrumbsQuery;
use classifieds_nav::config::{self, Config};
use classifieds_nav::infrastructure::cache::{CacheService, NullCache, RedisCache};
use classifieds_nav::server;
use classifieds_nav::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing classifieds-nav.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sitemap cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Print the breadcrumb trail of a location, optionally narrowed to a classification
    Breadcrumbs {
        /// Location slug
        location: String,

        /// Classification slug
        classification: Option<String>,

        /// Domain the trail is resolved for
        #[arg(long)]
        host: String,
    },

    /// Print the root sitemap index of a domain
    Sitemap {
        /// Domain to render
        #[arg(long)]
        host: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Drop every cached sitemap document
    Invalidate {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show row counts per table
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = server::connect_database(&config).await?;

    match cli.command {
        Commands::Cache { action } => handle_cache_action(action, &config, pool).await?,
        Commands::Breadcrumbs {
            location,
            classification,
            host,
        } => print_breadcrumbs(&config, pool, &host, location, classification).await?,
        Commands::Sitemap { host } => print_sitemap(&config, pool, &host).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// The server's in-process cache lives in the server; only Redis is shared.
async fn shared_cache(config: &Config) -> Result<Arc<dyn CacheService>> {
    match &config.redis_url {
        Some(redis_url) => {
            let redis = RedisCache::connect(redis_url, config.sitemap_cache_ttl)
                .await
                .context("Failed to connect to Redis")?;
            Ok(Arc::new(redis))
        }
        None => Ok(Arc::new(NullCache::new())),
    }
}

async fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let cache = shared_cache(config).await?;
    server::build_state(config, pool, cache)
}

/// Invalidates the `advertisements` tag after confirmation.
async fn handle_cache_action(action: CacheAction, config: &Config, pool: PgPool) -> Result<()> {
    match action {
        CacheAction::Invalidate { yes } => {
            println!("{}", "🧹 Invalidate sitemap cache".bright_blue().bold());
            println!();

            if !config.is_redis_enabled() {
                println!(
                    "{}",
                    "⚠️  Redis is not configured; each server keeps its own in-process cache."
                        .yellow()
                );
                println!("   Restart the servers to drop their sitemaps.");
                return Ok(());
            }

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Drop every cached sitemap?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let state = build_state(config, pool).await?;
            state
                .sitemap_service
                .invalidate()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to invalidate cache: {}", e))?;

            println!("{}", "✅ Sitemap cache invalidated".green().bold());
        }
    }

    Ok(())
}

async fn print_breadcrumbs(
    config: &Config,
    pool: PgPool,
    host: &str,
    location: String,
    classification: Option<String>,
) -> Result<()> {
    let state = build_state(config, pool).await?;

    let domain = state
        .domain_service
        .resolve(host)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let query = BreadcrumbsQuery {
        advertisement: None,
        location: Some(location),
        classification,
    };

    let trail = state
        .breadcrumbs_service
        .resolve(&query, &domain)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "🧭 Breadcrumbs".bright_blue().bold());
    println!();
    for (depth, crumb) in trail.iter().enumerate() {
        println!(
            "  {}{} {}",
            "  ".repeat(depth),
            crumb.title.cyan(),
            crumb.path.bright_black()
        );
    }
    println!();

    Ok(())
}

async fn print_sitemap(config: &Config, pool: PgPool, host: &str) -> Result<()> {
    let state = build_state(config, pool).await?;

    let domain = state
        .domain_service
        .resolve(host)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let document = state
        .sitemap_service
        .root_document(&domain)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{document}");
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());
            println!();

            for table in [
                "domains",
                "locations",
                "classifications",
                "advertisements",
            ] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
                println!(
                    "  {:<16} {}",
                    table,
                    count.to_string().bright_green().bold()
                );
            }
            println!();
        }
    }

    Ok(())
}
