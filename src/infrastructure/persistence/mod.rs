//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Hierarchy lookups share the recursive-CTE loaders in [`hierarchy`].
//!
//! # Repositories
//!
//! - [`PgDomainRepository`] - Tenant domains
//! - [`PgLocationRepository`] - Location hierarchy and per-domain areas
//! - [`PgClassificationRepository`] - Classification hierarchy and per-domain sections
//! - [`PgAdvertisementRepository`] - Advertisements and sitemap queries

pub mod hierarchy;
pub mod pg_advertisement_repository;
pub mod pg_classification_repository;
pub mod pg_domain_repository;
pub mod pg_location_repository;

pub use pg_advertisement_repository::PgAdvertisementRepository;
pub use pg_classification_repository::PgClassificationRepository;
pub use pg_domain_repository::PgDomainRepository;
pub use pg_location_repository::PgLocationRepository;
