//! PostgreSQL implementation of location repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::hierarchy::{ChainStart, assemble_location, fetch_location_chain};
use crate::domain::entities::{Area, Location};
use crate::domain::repositories::LocationRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AreaRow {
    id: i64,
    slug: String,
    title: String,
}

/// PostgreSQL repository for the location hierarchy.
///
/// Nodes live in `locations` (self-referencing via `parent_id`); areas are
/// enabled per domain through `location_domains`.
pub struct PgLocationRepository {
    pool: Arc<PgPool>,
}

impl PgLocationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, AppError> {
        let rows = fetch_location_chain(self.pool.as_ref(), ChainStart::Slug(slug)).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        assemble_location(rows).map(Some)
    }

    async fn is_area_enabled(&self, area_id: i64, domain_id: i64) -> Result<bool, AppError> {
        let enabled: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM location_domains
                WHERE location_id = $1 AND domain_id = $2
            )
            "#,
        )
        .bind(area_id)
        .bind(domain_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(enabled)
    }

    async fn find_areas_by_domain(&self, domain_id: i64) -> Result<Vec<Area>, AppError> {
        let rows = sqlx::query_as::<_, AreaRow>(
            r#"
            SELECT l.id, l.slug, l.title
            FROM locations l
            JOIN location_domains ld ON ld.location_id = l.id
            WHERE ld.domain_id = $1 AND l.kind = 'area'
            ORDER BY l.title, l.id
            "#,
        )
        .bind(domain_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Area {
                id: r.id,
                slug: r.slug,
                title: r.title,
            })
            .collect())
    }
}
