//! Repository trait for advertisements.

use crate::domain::entities::Advertisement;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// One keyset-paginated slice of ads under a location/classification pair.
///
/// Matches ads filed anywhere in the subtree of `location_id` and of
/// `classification_id`, created on `date` (UTC), with `id > after_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementPage {
    pub location_id: i64,
    pub classification_id: i64,
    pub date: NaiveDate,
    pub after_id: Option<i64>,
    pub limit: i64,
}

/// Repository interface for advertisements.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAdvertisementRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    /// Finds an advertisement by its unique slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Advertisement>, AppError>;

    /// Distinct creation days (ascending) of ads under the given area and section.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn actual_dates(&self, area_id: i64, section_id: i64)
    -> Result<Vec<NaiveDate>, AppError>;

    /// Fetches the next page of ads ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_page(&self, page: AdvertisementPage) -> Result<Vec<Advertisement>, AppError>;
}
