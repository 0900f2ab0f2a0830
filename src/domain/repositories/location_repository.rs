//! Repository trait for the location hierarchy.

use crate::domain::entities::{Area, Location};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for locations.
///
/// Returned [`Location`] values carry their full ancestry.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLocationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Finds a location of any depth by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or a malformed parent chain.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, AppError>;

    /// Whether the given area is enabled on the given domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn is_area_enabled(&self, area_id: i64, domain_id: i64) -> Result<bool, AppError>;

    /// Lists the areas enabled on a domain, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_areas_by_domain(&self, domain_id: i64) -> Result<Vec<Area>, AppError>;
}
