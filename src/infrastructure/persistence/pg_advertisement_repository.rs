//! PostgreSQL implementation of advertisement repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use super::hierarchy::{
    ChainStart, assemble_classification, assemble_location, fetch_classification_chain,
    fetch_location_chain,
};
use crate::domain::entities::{Advertisement, Classification, Location};
use crate::domain::repositories::{AdvertisementPage, AdvertisementRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct AdvertisementRow {
    id: i64,
    slug: String,
    title: String,
    location_id: i64,
    classification_id: i64,
    created_at: DateTime<Utc>,
}

/// Descendant sets of a location ($1) and a classification ($2).
const SUBTREES: &str = r#"
    WITH RECURSIVE loc AS (
        SELECT id FROM locations WHERE id = $1
        UNION ALL
        SELECT l.id FROM locations l JOIN loc ON l.parent_id = loc.id
    ),
    cls AS (
        SELECT id FROM classifications WHERE id = $2
        UNION ALL
        SELECT c.id FROM classifications c JOIN cls ON c.parent_id = cls.id
    )
"#;

/// PostgreSQL repository for advertisements.
///
/// Ads reference a location and a classification of any depth; sitemap
/// queries match whole subtrees below the requested nodes.
pub struct PgAdvertisementRepository {
    pool: Arc<PgPool>,
}

impl PgAdvertisementRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_location(&self, id: i64) -> Result<Location, AppError> {
        let rows = fetch_location_chain(self.pool.as_ref(), ChainStart::Id(id)).await?;
        assemble_location(rows)
    }

    async fn load_classification(&self, id: i64) -> Result<Classification, AppError> {
        let rows = fetch_classification_chain(self.pool.as_ref(), ChainStart::Id(id)).await?;
        assemble_classification(rows)
    }
}

#[async_trait]
impl AdvertisementRepository for PgAdvertisementRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Advertisement>, AppError> {
        let row = sqlx::query_as::<_, AdvertisementRow>(
            r#"
            SELECT id, slug, title, location_id, classification_id, created_at
            FROM advertisements
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Advertisement {
            location: self.load_location(row.location_id).await?,
            classification: self.load_classification(row.classification_id).await?,
            id: row.id,
            slug: row.slug,
            title: row.title,
            created_at: row.created_at,
        }))
    }

    async fn actual_dates(
        &self,
        area_id: i64,
        section_id: i64,
    ) -> Result<Vec<NaiveDate>, AppError> {
        let sql = format!(
            r#"{SUBTREES}
            SELECT DISTINCT (a.created_at AT TIME ZONE 'UTC')::date AS day
            FROM advertisements a
            WHERE a.location_id IN (SELECT id FROM loc)
              AND a.classification_id IN (SELECT id FROM cls)
            ORDER BY day
            "#
        );

        let days: Vec<NaiveDate> = sqlx::query_scalar(&sql)
            .bind(area_id)
            .bind(section_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(days)
    }

    async fn find_page(&self, page: AdvertisementPage) -> Result<Vec<Advertisement>, AppError> {
        let sql = format!(
            r#"{SUBTREES}
            SELECT a.id, a.slug, a.title, a.location_id, a.classification_id, a.created_at
            FROM advertisements a
            WHERE a.location_id IN (SELECT id FROM loc)
              AND a.classification_id IN (SELECT id FROM cls)
              AND (a.created_at AT TIME ZONE 'UTC')::date = $3
              AND ($4::BIGINT IS NULL OR a.id > $4)
            ORDER BY a.id
            LIMIT $5
            "#
        );

        let rows = sqlx::query_as::<_, AdvertisementRow>(&sql)
            .bind(page.location_id)
            .bind(page.classification_id)
            .bind(page.date)
            .bind(page.after_id)
            .bind(page.limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        // Ads in one page share few distinct nodes; load each chain once.
        let mut locations: HashMap<i64, Location> = HashMap::new();
        let mut classifications: HashMap<i64, Classification> = HashMap::new();
        let mut ads = Vec::with_capacity(rows.len());

        for row in rows {
            let location = match locations.get(&row.location_id) {
                Some(location) => location.clone(),
                None => {
                    let location = self.load_location(row.location_id).await?;
                    locations.insert(row.location_id, location.clone());
                    location
                }
            };
            let classification = match classifications.get(&row.classification_id) {
                Some(classification) => classification.clone(),
                None => {
                    let classification = self.load_classification(row.classification_id).await?;
                    classifications.insert(row.classification_id, classification.clone());
                    classification
                }
            };

            ads.push(Advertisement {
                id: row.id,
                slug: row.slug,
                title: row.title,
                location,
                classification,
                created_at: row.created_at,
            });
        }

        Ok(ads)
    }
}
