//! Classification lookup service.

use crate::domain::entities::{Classification, Domain, Section};
use crate::domain::repositories::ClassificationRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Looks up classifications by slug.
pub struct ClassificationService {
    repository: Arc<dyn ClassificationRepository>,
}

impl ClassificationService {
    /// Creates a new classification service.
    pub fn new(repository: Arc<dyn ClassificationRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a lookup slug to a classification of any depth.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no classification has this slug.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Classification, AppError> {
        self.repository.find_by_slug(slug).await?.ok_or_else(|| {
            AppError::not_found(
                "Classification not found",
                json!({ "classification": slug }),
            )
        })
    }

    /// Sections enabled on a domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn sections_for(&self, domain: &Domain) -> Result<Vec<Section>, AppError> {
        self.repository.find_sections_by_domain(domain.id).await
    }
}
