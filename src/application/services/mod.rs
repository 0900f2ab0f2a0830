//! Business logic services for the application layer.

pub mod breadcrumbs_service;
pub mod classification_service;
pub mod domain_service;
pub mod location_service;
pub mod sitemap_service;

pub use breadcrumbs_service::{Breadcrumb, BreadcrumbsQuery, BreadcrumbsService};
pub use classification_service::ClassificationService;
pub use domain_service::DomainService;
pub use location_service::LocationService;
pub use sitemap_service::{SitemapService, SitemapSettings};
