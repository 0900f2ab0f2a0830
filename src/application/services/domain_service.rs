//! Tenant domain resolution service.

use crate::domain::entities::Domain;
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Resolves the tenant site a request is addressed to.
pub struct DomainService {
    repository: Arc<dyn DomainRepository>,
}

impl DomainService {
    /// Creates a new domain service.
    pub fn new(repository: Arc<dyn DomainRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a request host to an active domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the host is unknown.
    /// Returns [`AppError::Unavailable`] if the domain is deactivated.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, host: &str) -> Result<Domain, AppError> {
        let domain = self
            .repository
            .find_by_host(host)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({ "host": host })))?;

        if !domain.is_active {
            return Err(AppError::unavailable(
                "Domain is not active",
                json!({ "host": host }),
            ));
        }

        Ok(domain)
    }

    /// Number of active domains; used by health checks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_active(&self) -> Result<i64, AppError> {
        self.repository.count_active().await
    }
}
