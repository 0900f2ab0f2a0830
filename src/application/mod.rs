//! Application layer services implementing business logic.
//!
//! Services load entities through repository traits, hand them to the pure
//! resolvers of the domain layer and shape the results for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::domain_service::DomainService`] - Tenant resolution by host
//! - [`services::location_service::LocationService`] - Location lookup and per-domain visibility
//! - [`services::classification_service::ClassificationService`] - Classification lookup
//! - [`services::breadcrumbs_service::BreadcrumbsService`] - Rendered breadcrumb trails
//! - [`services::sitemap_service::SitemapService`] - Sitemap enumeration and cached documents

pub mod services;
