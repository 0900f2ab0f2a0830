#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use classifieds_nav::application::services::SitemapSettings;
use classifieds_nav::domain::entities::{
    Advertisement, Area, Category, City, Classification, Country, Domain, Location, Region,
    Section, SubCategory,
};
use classifieds_nav::domain::repositories::{
    AdvertisementPage, AdvertisementRepository, ClassificationRepository, DomainRepository,
    LocationRepository,
};
use classifieds_nav::error::AppError;
use classifieds_nav::infrastructure::cache::{CacheService, MemoryCache};
use classifieds_nav::infrastructure::rendering::AskamaSitemapRenderer;
use classifieds_nav::infrastructure::routing::PathUrlGenerator;
use classifieds_nav::state::{AppState, Collaborators};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const HOST: &str = "ads.example.com";
pub const INACTIVE_HOST: &str = "old.example.com";
pub const EMPTY_HOST: &str = "other.example.com";

/// In-memory stand-in for the PostgreSQL repositories.
///
/// Every repository call bumps `calls`, so tests can tell a cache hit from a
/// fresh render.
#[derive(Default)]
pub struct FakeStore {
    pub domains: Vec<Domain>,
    pub locations: Vec<Location>,
    /// `(area_id, domain_id)`
    pub enabled_areas: Vec<(i64, i64)>,
    pub classifications: Vec<Classification>,
    /// `(section_id, domain_id)`
    pub enabled_sections: Vec<(i64, i64)>,
    pub advertisements: Vec<Advertisement>,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn location_chain_contains(location: &Location, id: i64) -> bool {
    let mut node = Some(location.clone());
    while let Some(current) = node {
        if current.id() == id {
            return true;
        }
        node = current.parent();
    }
    false
}

fn classification_chain_contains(classification: &Classification, id: i64) -> bool {
    let mut node = Some(classification.clone());
    while let Some(current) = node {
        if current.id() == id {
            return true;
        }
        node = current.parent();
    }
    false
}

#[async_trait]
impl DomainRepository for FakeStore {
    async fn find_by_host(&self, host: &str) -> Result<Option<Domain>, AppError> {
        self.hit();
        Ok(self.domains.iter().find(|d| d.host == host).cloned())
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        self.hit();
        Ok(self.domains.iter().filter(|d| d.is_active).count() as i64)
    }
}

#[async_trait]
impl LocationRepository for FakeStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, AppError> {
        self.hit();
        Ok(self.locations.iter().find(|l| l.slug() == slug).cloned())
    }

    async fn is_area_enabled(&self, area_id: i64, domain_id: i64) -> Result<bool, AppError> {
        self.hit();
        Ok(self.enabled_areas.contains(&(area_id, domain_id)))
    }

    async fn find_areas_by_domain(&self, domain_id: i64) -> Result<Vec<Area>, AppError> {
        self.hit();
        Ok(self
            .locations
            .iter()
            .filter_map(|l| match l {
                Location::Area(area) if self.enabled_areas.contains(&(area.id, domain_id)) => {
                    Some(area.clone())
                }
                _ => None,
            })
            .collect())
    }
}

#[async_trait]
impl ClassificationRepository for FakeStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Classification>, AppError> {
        self.hit();
        Ok(self
            .classifications
            .iter()
            .find(|c| c.slug() == slug)
            .cloned())
    }

    async fn find_sections_by_domain(&self, domain_id: i64) -> Result<Vec<Section>, AppError> {
        self.hit();
        Ok(self
            .classifications
            .iter()
            .filter_map(|c| match c {
                Classification::Section(section)
                    if self.enabled_sections.contains(&(section.id, domain_id)) =>
                {
                    Some(section.clone())
                }
                _ => None,
            })
            .collect())
    }
}

#[async_trait]
impl AdvertisementRepository for FakeStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Advertisement>, AppError> {
        self.hit();
        Ok(self.advertisements.iter().find(|a| a.slug == slug).cloned())
    }

    async fn actual_dates(
        &self,
        area_id: i64,
        section_id: i64,
    ) -> Result<Vec<NaiveDate>, AppError> {
        self.hit();
        let dates: BTreeSet<NaiveDate> = self
            .advertisements
            .iter()
            .filter(|a| {
                a.location.area().id == area_id && a.classification.section().id == section_id
            })
            .map(|a| a.created_on())
            .collect();
        Ok(dates.into_iter().collect())
    }

    async fn find_page(&self, page: AdvertisementPage) -> Result<Vec<Advertisement>, AppError> {
        self.hit();
        let mut matching: Vec<Advertisement> = self
            .advertisements
            .iter()
            .filter(|a| {
                location_chain_contains(&a.location, page.location_id)
                    && classification_chain_contains(&a.classification, page.classification_id)
                    && a.created_on() == page.date
                    && page.after_id.is_none_or(|after| a.id > after)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|a| a.id);
        matching.truncate(page.limit as usize);
        Ok(matching)
    }
}

pub fn americas() -> Area {
    Area {
        id: 1,
        slug: "americas".to_string(),
        title: "Americas".to_string(),
    }
}

pub fn europe() -> Area {
    Area {
        id: 5,
        slug: "europe".to_string(),
        title: "Europe".to_string(),
    }
}

pub fn usa() -> Country {
    Country {
        id: 2,
        slug: "usa".to_string(),
        title: "USA".to_string(),
        area: americas(),
    }
}

pub fn france() -> Country {
    Country {
        id: 6,
        slug: "france".to_string(),
        title: "France".to_string(),
        area: europe(),
    }
}

pub fn springfield() -> City {
    City {
        id: 3,
        slug: "springfield".to_string(),
        title: "Springfield".to_string(),
        country: usa(),
    }
}

pub fn downtown() -> Region {
    Region {
        id: 4,
        slug: "downtown".to_string(),
        title: "Downtown".to_string(),
        city: springfield(),
    }
}

pub fn buy_and_sell() -> Section {
    Section {
        id: 10,
        slug: "buy-and-sell".to_string(),
        title: "Buy and Sell".to_string(),
    }
}

pub fn jobs() -> Section {
    Section {
        id: 20,
        slug: "jobs".to_string(),
        title: "Jobs".to_string(),
    }
}

pub fn electronics() -> Category {
    Category {
        id: 11,
        slug: "electronics".to_string(),
        real_slug: "electronics-cat".to_string(),
        title: "Electronics".to_string(),
        section: buy_and_sell(),
    }
}

pub fn laptops() -> SubCategory {
    SubCategory {
        id: 12,
        slug: "laptops".to_string(),
        real_slug: "laptops-sub".to_string(),
        title: "Laptops".to_string(),
        category: electronics(),
    }
}

fn advertisement(
    id: i64,
    slug: &str,
    location: Location,
    classification: Classification,
    day: u32,
) -> Advertisement {
    Advertisement {
        id,
        slug: slug.to_string(),
        title: format!("Advertisement {id}"),
        location,
        classification,
        created_at: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
    }
}

/// A small network: one active domain showing the Americas with two
/// sections, an inactive domain, and an active domain with nothing enabled.
pub fn sample_store() -> FakeStore {
    FakeStore {
        domains: vec![
            Domain::new(1, HOST.to_string(), true, Utc::now()),
            Domain::new(2, INACTIVE_HOST.to_string(), false, Utc::now()),
            Domain::new(3, EMPTY_HOST.to_string(), true, Utc::now()),
        ],
        locations: vec![
            americas().into(),
            europe().into(),
            usa().into(),
            france().into(),
            springfield().into(),
            downtown().into(),
        ],
        enabled_areas: vec![(1, 1), (5, 3)],
        classifications: vec![
            buy_and_sell().into(),
            jobs().into(),
            electronics().into(),
            laptops().into(),
        ],
        enabled_sections: vec![(10, 1), (20, 1)],
        advertisements: vec![
            advertisement(
                25,
                "advertisement-25_25",
                springfield().into(),
                laptops().into(),
                1,
            ),
            advertisement(26, "advertisement-26", downtown().into(), electronics().into(), 1),
            advertisement(27, "advertisement-27", usa().into(), buy_and_sell().into(), 2),
            advertisement(28, "advertisement-28", france().into(), jobs().into(), 3),
        ],
        ..FakeStore::default()
    }
}

/// Builds the application state over `store` with an in-process cache.
pub fn create_test_state(store: Arc<FakeStore>) -> (AppState, Arc<dyn CacheService>) {
    create_test_state_with(store, SitemapSettings::default())
}

pub fn create_test_state_with(
    store: Arc<FakeStore>,
    settings: SitemapSettings,
) -> (AppState, Arc<dyn CacheService>) {
    let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new(settings.cache_ttl_seconds));

    let collaborators = Collaborators {
        domains: store.clone(),
        locations: store.clone(),
        classifications: store.clone(),
        advertisements: store,
        cache: cache.clone(),
        url_generator: Arc::new(PathUrlGenerator::new("https://ads.example.com/").unwrap()),
        renderer: Arc::new(AskamaSitemapRenderer),
    };

    (AppState::new(collaborators, settings, 86_400), cache)
}
