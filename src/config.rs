//! Settings read from the environment at startup.
//!
//! The server and the `admin` binary share this loader, so both see the
//! same database, cache and sitemap settings.
//!
//! ## Connections
//!
//! PostgreSQL comes from `DATABASE_URL`, or from `DB_HOST`, `DB_PORT`,
//! `DB_USER`, `DB_PASSWORD` and `DB_NAME` when no URL is given. Redis is
//! optional: `REDIS_URL`, or `REDIS_HOST` with `REDIS_PORT`, `REDIS_PASSWORD`
//! and `REDIS_DB`. Without Redis, sitemap documents are cached in process.
//!
//! ## Everything else
//!
//! | Variable              | Default                  |
//! |-----------------------|--------------------------|
//! | `LISTEN`              | `0.0.0.0:3000`           |
//! | `RUST_LOG`            | `info`                   |
//! | `LOG_FORMAT`          | `text` (or `json`)       |
//! | `PUBLIC_BASE_URL`     | `http://localhost:3000/` |
//! | `BREADCRUMBS_MAX_AGE` | `86400`                  |
//! | `SITEMAP_CACHE_TTL`   | `86400`                  |
//! | `SITEMAP_BATCH_SIZE`  | `500`                    |
//! | `DB_MAX_CONNECTIONS`  | `10`                     |
//! | `DB_CONNECT_TIMEOUT`  | `30`                     |
//! | `DB_IDLE_TIMEOUT`     | `600`                    |
//! | `DB_MAX_LIFETIME`     | `1800`                   |

use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const ONE_DAY_SECONDS: u64 = 86_400;

/// Shape of the log lines written by the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("LOG_FORMAT must be 'text' or 'json', got '{other}'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Limits applied to the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Scheme and path prefix of sitemap `<loc>` entries. The host is
    /// replaced by the requesting tenant domain.
    pub public_base_url: String,
    /// `s-maxage` sent with breadcrumb responses, in seconds.
    pub breadcrumbs_max_age: u64,
    pub sitemap_cache_ttl: u64,
    /// Advertisements fetched per query while streaming a leaf sitemap.
    pub sitemap_batch_size: i64,
    pub pool: PoolConfig,
}

impl Config {
    /// Reads every setting from the environment.
    ///
    /// # Errors
    ///
    /// Fails when PostgreSQL is not configured or a numeric or enumerated
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let pool = PoolConfig {
            max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_var("DB_CONNECT_TIMEOUT", 30)?),
            idle_timeout: Duration::from_secs(parse_var("DB_IDLE_TIMEOUT", 600)?),
            max_lifetime: Duration::from_secs(parse_var("DB_MAX_LIFETIME", 1800)?),
        };

        Ok(Self {
            database_url: database_url().context("PostgreSQL is not configured")?,
            redis_url: redis_url(),
            listen_addr: var_or("LISTEN", "0.0.0.0:3000"),
            log_level: var_or("RUST_LOG", "info"),
            log_format: var_or("LOG_FORMAT", "text").parse()?,
            public_base_url: var_or("PUBLIC_BASE_URL", "http://localhost:3000/"),
            breadcrumbs_max_age: parse_var("BREADCRUMBS_MAX_AGE", ONE_DAY_SECONDS)?,
            sitemap_cache_ttl: parse_var("SITEMAP_CACHE_TTL", ONE_DAY_SECONDS)?,
            sitemap_batch_size: parse_var("SITEMAP_BATCH_SIZE", 500)?,
            pool,
        })
    }

    /// Rejects settings the server cannot start with.
    ///
    /// # Errors
    ///
    /// Returns the first offending setting.
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            bail!("LISTEN must be 'host:port', got '{}'", self.listen_addr);
        }

        if !has_scheme(&self.database_url, &["postgres", "postgresql"]) {
            bail!(
                "DATABASE_URL must be a postgres:// URL, got '{}'",
                mask_connection_string(&self.database_url)
            );
        }

        if let Some(redis_url) = &self.redis_url
            && !has_scheme(redis_url, &["redis", "rediss"])
        {
            bail!(
                "REDIS_URL must be a redis:// or rediss:// URL, got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if !has_scheme(&self.public_base_url, &["http", "https"]) {
            bail!(
                "PUBLIC_BASE_URL must be an http(s) origin, got '{}'",
                self.public_base_url
            );
        }

        if self.sitemap_cache_ttl == 0 {
            bail!("SITEMAP_CACHE_TTL must be positive");
        }

        // A single page never needs to exceed what one leaf document lists.
        if !(1..=50_000).contains(&self.sitemap_batch_size) {
            bail!(
                "SITEMAP_BATCH_SIZE must be within 1..=50000, got {}",
                self.sitemap_batch_size
            );
        }

        if self.pool.max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be positive");
        }
        if self.pool.acquire_timeout.is_zero() {
            bail!("DB_CONNECT_TIMEOUT must be positive");
        }

        Ok(())
    }

    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Logs the effective settings with credentials masked.
    pub fn print_summary(&self) {
        let cache = self
            .redis_url
            .as_deref()
            .map(mask_connection_string)
            .unwrap_or_else(|| "in-process".to_string());

        tracing::info!(
            listen = %self.listen_addr,
            database = %mask_connection_string(&self.database_url),
            cache = %cache,
            "Configuration loaded"
        );
        tracing::info!(
            public_base_url = %self.public_base_url,
            breadcrumbs_max_age = self.breadcrumbs_max_age,
            sitemap_cache_ttl = self.sitemap_cache_ttl,
            sitemap_batch_size = self.sitemap_batch_size,
            "Navigation settings"
        );
        tracing::info!(level = %self.log_level, format = %self.log_format, "Logging");
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Reads `name` as a `T`, using `default` when the variable is unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

fn has_scheme(url: &str, schemes: &[&str]) -> bool {
    url.split_once("://")
        .is_some_and(|(scheme, _)| schemes.contains(&scheme))
}

/// `DATABASE_URL`, or a URL assembled from the `DB_*` parts.
fn database_url() -> Result<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let required = |name: &str| {
        env::var(name).with_context(|| format!("{name} is required without DATABASE_URL"))
    };

    let user = required("DB_USER")?;
    let password = required("DB_PASSWORD")?;
    let name = required("DB_NAME")?;
    let host = var_or("DB_HOST", "localhost");
    let port = var_or("DB_PORT", "5432");

    Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
}

/// `REDIS_URL`, or a URL assembled from the `REDIS_*` parts when
/// `REDIS_HOST` is set.
fn redis_url() -> Option<String> {
    if let Ok(url) = env::var("REDIS_URL") {
        return Some(url);
    }

    let host = env::var("REDIS_HOST").ok()?;
    let port = var_or("REDIS_PORT", "6379");
    let db = var_or("REDIS_DB", "0");

    let auth = env::var("REDIS_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .map(|p| format!(":{p}@"))
        .unwrap_or_default();

    Some(format!("redis://{auth}{host}:{port}/{db}"))
}

/// Replaces the password of a connection URL with `***`.
///
/// `postgres://nav:secret@db/classifieds` becomes
/// `postgres://nav:***@db/classifieds`; URLs without a password are returned
/// unchanged.
pub fn mask_connection_string(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, location)) = rest.split_once('@') else {
        return url.to_string();
    };

    match credentials.rsplit_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{location}"),
        None => url.to_string(),
    }
}

/// Loads the configuration and validates it.
///
/// `.env` is expected to be loaded by the caller.
///
/// # Errors
///
/// Returns an error when a variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
