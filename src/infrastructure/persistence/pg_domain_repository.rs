//! PostgreSQL implementation of domain repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Domain;
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct DomainRow {
    id: i64,
    host: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<DomainRow> for Domain {
    fn from(r: DomainRow) -> Self {
        Domain::new(r.id, r.host, r.is_active, r.created_at)
    }
}

/// PostgreSQL repository for tenant domains.
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn find_by_host(&self, host: &str) -> Result<Option<Domain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(
            r#"
            SELECT id, host, is_active, created_at
            FROM domains
            WHERE host = $1
            "#,
        )
        .bind(host)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Domain::from))
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domains WHERE is_active")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
