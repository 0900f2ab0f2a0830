//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence collaborators consumed by the
//! application services. Implementations live in
//! `crate::infrastructure::persistence`; mocks are generated with `mockall`.
//!
//! # Available Repositories
//!
//! - [`DomainRepository`] - Tenant domain lookup
//! - [`LocationRepository`] - Location hierarchy lookup and visibility
//! - [`ClassificationRepository`] - Classification hierarchy lookup and visibility
//! - [`AdvertisementRepository`] - Advertisement lookup and sitemap queries

pub mod advertisement_repository;
pub mod classification_repository;
pub mod domain_repository;
pub mod location_repository;

pub use advertisement_repository::{AdvertisementPage, AdvertisementRepository};
pub use classification_repository::ClassificationRepository;
pub use domain_repository::DomainRepository;
pub use location_repository::LocationRepository;

#[cfg(test)]
pub use advertisement_repository::MockAdvertisementRepository;
#[cfg(test)]
pub use classification_repository::MockClassificationRepository;
#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
