//! Location lookup service with per-domain visibility.

use crate::domain::entities::{Area, Domain, Location};
use crate::domain::repositories::LocationRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Looks up locations and enforces that their area is enabled on the domain.
pub struct LocationService {
    repository: Arc<dyn LocationRepository>,
}

impl LocationService {
    /// Creates a new location service.
    pub fn new(repository: Arc<dyn LocationRepository>) -> Self {
        Self { repository }
    }

    /// Finds a location by slug, regardless of domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no location has this slug.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Location, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Location not found", json!({ "location": slug })))
    }

    /// Finds a location by slug and checks it is visible on `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no location has this slug.
    /// Returns [`AppError::Unavailable`] if its area is not enabled on the domain.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_slug_and_domain(
        &self,
        slug: &str,
        domain: &Domain,
    ) -> Result<Location, AppError> {
        let location = self.get_by_slug(slug).await?;

        if !self
            .repository
            .is_area_enabled(location.area().id, domain.id)
            .await?
        {
            return Err(AppError::unavailable(
                "Location is not available on this domain",
                json!({ "location": slug, "domain": domain.host }),
            ));
        }

        Ok(location)
    }

    /// Areas enabled on a domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn areas_for(&self, domain: &Domain) -> Result<Vec<Area>, AppError> {
        self.repository.find_areas_by_domain(domain.id).await
    }
}
