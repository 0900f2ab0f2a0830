//! Repository trait for the classification hierarchy.

use crate::domain::entities::{Classification, Section};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for classifications.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClassificationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassificationRepository: Send + Sync {
    /// Finds a classification of any depth by its lookup slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or a malformed parent chain.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Classification>, AppError>;

    /// Lists the sections enabled on a domain, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_sections_by_domain(&self, domain_id: i64) -> Result<Vec<Section>, AppError>;
}
