//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    BreadcrumbsService, ClassificationService, DomainService, LocationService, SitemapService,
    SitemapSettings,
};
use crate::domain::repositories::{
    AdvertisementRepository, ClassificationRepository, DomainRepository, LocationRepository,
};
use crate::domain::route::UrlGenerator;
use crate::domain::sitemap::SitemapRenderer;
use crate::infrastructure::cache::CacheService;

/// Everything the services need from the outside world.
///
/// The server wires PostgreSQL repositories here; tests wire in-memory fakes.
pub struct Collaborators {
    pub domains: Arc<dyn DomainRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub classifications: Arc<dyn ClassificationRepository>,
    pub advertisements: Arc<dyn AdvertisementRepository>,
    pub cache: Arc<dyn CacheService>,
    pub url_generator: Arc<dyn UrlGenerator>,
    pub renderer: Arc<dyn SitemapRenderer>,
}

#[derive(Clone)]
pub struct AppState {
    pub domain_service: Arc<DomainService>,
    pub breadcrumbs_service: Arc<BreadcrumbsService>,
    pub sitemap_service: Arc<SitemapService>,
    pub cache: Arc<dyn CacheService>,
    /// `s-maxage` sent with breadcrumb responses, in seconds.
    pub breadcrumbs_max_age: u64,
}

impl AppState {
    /// Builds the service graph on top of `collaborators`.
    pub fn new(
        collaborators: Collaborators,
        sitemap_settings: SitemapSettings,
        breadcrumbs_max_age: u64,
    ) -> Self {
        let Collaborators {
            domains,
            locations,
            classifications,
            advertisements,
            cache,
            url_generator,
            renderer,
        } = collaborators;

        let location_service = Arc::new(LocationService::new(locations));
        let classification_service = Arc::new(ClassificationService::new(classifications));

        let breadcrumbs_service = Arc::new(BreadcrumbsService::new(
            location_service.clone(),
            classification_service.clone(),
            advertisements.clone(),
            url_generator.clone(),
        ));

        let sitemap_service = Arc::new(SitemapService::new(
            location_service,
            classification_service,
            advertisements,
            cache.clone(),
            renderer,
            url_generator,
            sitemap_settings,
        ));

        Self {
            domain_service: Arc::new(DomainService::new(domains)),
            breadcrumbs_service,
            sitemap_service,
            cache,
            breadcrumbs_max_age,
        }
    }
}
