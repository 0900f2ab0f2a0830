//! PostgreSQL implementation of classification repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::hierarchy::{ChainStart, assemble_classification, fetch_classification_chain};
use crate::domain::entities::{Classification, Section};
use crate::domain::repositories::ClassificationRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct SectionRow {
    id: i64,
    slug: String,
    title: String,
}

/// PostgreSQL repository for the classification hierarchy.
pub struct PgClassificationRepository {
    pool: Arc<PgPool>,
}

impl PgClassificationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassificationRepository for PgClassificationRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Classification>, AppError> {
        let rows = fetch_classification_chain(self.pool.as_ref(), ChainStart::Slug(slug)).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        assemble_classification(rows).map(Some)
    }

    async fn find_sections_by_domain(&self, domain_id: i64) -> Result<Vec<Section>, AppError> {
        let rows = sqlx::query_as::<_, SectionRow>(
            r#"
            SELECT c.id, c.slug, c.title
            FROM classifications c
            JOIN classification_domains cd ON cd.classification_id = c.id
            WHERE cd.domain_id = $1 AND c.kind = 'section'
            ORDER BY c.title, c.id
            "#,
        )
        .bind(domain_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Section {
                id: r.id,
                slug: r.slug,
                title: r.title,
            })
            .collect())
    }
}
