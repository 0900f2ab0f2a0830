//! Repository trait for tenant domain lookup.

use crate::domain::entities::Domain;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for tenant domains.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Finds a domain by its host name (e.g. "ads.example.com").
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_host(&self, host: &str) -> Result<Option<Domain>, AppError>;

    /// Counts active domains. Doubles as a connectivity probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_active(&self) -> Result<i64, AppError>;
}
