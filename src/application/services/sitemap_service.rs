//! Sitemap generation service.
//!
//! Enumerations are exposed as lazy [`Stream`]s: each call starts a fresh,
//! finite walk that ends when the stream yields `None`. A collaborator
//! failure is yielded as one `Err` item, after which the stream ends.
//!
//! Rendered documents are cached under keys from
//! [`crate::domain::sitemap_key`] and tagged with [`ADVERTISEMENTS_TAG`].

use crate::application::services::{ClassificationService, LocationService};
use crate::domain::entities::{Advertisement, Area, Classification, Domain, Location, Section};
use crate::domain::repositories::{AdvertisementPage, AdvertisementRepository};
use crate::domain::route::{RouteKey, RouteName, UrlGenerator};
use crate::domain::sitemap::{MAX_SITEMAP_URLS, SitemapLink, SitemapPair, SitemapRenderer};
use crate::domain::sitemap_key::{ADVERTISEMENTS_TAG, leaf_sitemap_key, root_sitemap_key};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use chrono::NaiveDate;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tunables for sitemap generation.
#[derive(Debug, Clone, Copy)]
pub struct SitemapSettings {
    /// Lifetime of a cached document in seconds.
    pub cache_ttl_seconds: u64,
    /// Advertisements fetched per database round trip.
    pub batch_size: i64,
    /// URLs listed by one leaf document; ads beyond it are left out.
    pub max_urls_per_leaf: usize,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 86_400,
            batch_size: 500,
            max_urls_per_leaf: MAX_SITEMAP_URLS,
        }
    }
}

enum PairWalk {
    Start,
    Walking {
        areas: Vec<Area>,
        sections: Vec<Section>,
        next: usize,
    },
    Done,
}

struct AdCursor {
    buffer: VecDeque<Advertisement>,
    after_id: Option<i64>,
    exhausted: bool,
}

pub struct SitemapService {
    location_service: Arc<LocationService>,
    classification_service: Arc<ClassificationService>,
    advertisement_repository: Arc<dyn AdvertisementRepository>,
    cache: Arc<dyn CacheService>,
    renderer: Arc<dyn SitemapRenderer>,
    url_generator: Arc<dyn UrlGenerator>,
    settings: SitemapSettings,
}

impl SitemapService {
    pub fn new(
        location_service: Arc<LocationService>,
        classification_service: Arc<ClassificationService>,
        advertisement_repository: Arc<dyn AdvertisementRepository>,
        cache: Arc<dyn CacheService>,
        renderer: Arc<dyn SitemapRenderer>,
        url_generator: Arc<dyn UrlGenerator>,
        settings: SitemapSettings,
    ) -> Self {
        Self {
            location_service,
            classification_service,
            advertisement_repository,
            cache,
            renderer,
            url_generator,
            settings,
        }
    }

    /// Every area × section visible on `domain` that holds at least one ad.
    ///
    /// Pairs come out area-major in the order the collaborators list them.
    pub fn enumerate_non_empty_pairs(
        &self,
        domain: &Domain,
    ) -> impl Stream<Item = Result<SitemapPair, AppError>> + Send + 'static {
        let locations = self.location_service.clone();
        let classifications = self.classification_service.clone();
        let advertisements = self.advertisement_repository.clone();
        let domain = domain.clone();

        stream::unfold(PairWalk::Start, move |walk| {
            let locations = locations.clone();
            let classifications = classifications.clone();
            let advertisements = advertisements.clone();
            let domain = domain.clone();

            async move {
                let (areas, sections, mut next) = match walk {
                    PairWalk::Done => return None,
                    PairWalk::Walking {
                        areas,
                        sections,
                        next,
                    } => (areas, sections, next),
                    PairWalk::Start => {
                        let areas = match locations.areas_for(&domain).await {
                            Ok(areas) => areas,
                            Err(e) => return Some((Err(e), PairWalk::Done)),
                        };
                        let sections = match classifications.sections_for(&domain).await {
                            Ok(sections) => sections,
                            Err(e) => return Some((Err(e), PairWalk::Done)),
                        };
                        (areas, sections, 0)
                    }
                };

                while next < areas.len() * sections.len() {
                    let area = &areas[next / sections.len()];
                    let section = &sections[next % sections.len()];
                    next += 1;

                    match advertisements.actual_dates(area.id, section.id).await {
                        Ok(dates) if dates.is_empty() => continue,
                        Ok(dates) => {
                            let pair = SitemapPair {
                                area: area.clone(),
                                section: section.clone(),
                                dates,
                            };
                            let walk = PairWalk::Walking {
                                areas,
                                sections,
                                next,
                            };
                            return Some((Ok(pair), walk));
                        }
                        Err(e) => return Some((Err(e), PairWalk::Done)),
                    }
                }

                None
            }
        })
    }

    /// Advertisements under the `location` and `classification` subtrees
    /// created on `date`, in ascending id order.
    ///
    /// Pages of [`SitemapSettings::batch_size`] are fetched only as the
    /// stream is polled.
    pub fn enumerate_advertisements(
        &self,
        location: &Location,
        classification: &Classification,
        date: NaiveDate,
    ) -> impl Stream<Item = Result<Advertisement, AppError>> + Send + 'static {
        let repository = self.advertisement_repository.clone();
        let location_id = location.id();
        let classification_id = classification.id();
        let limit = self.settings.batch_size.max(1);

        let cursor = AdCursor {
            buffer: VecDeque::new(),
            after_id: None,
            exhausted: false,
        };

        stream::unfold(Some(cursor), move |cursor| {
            let repository = repository.clone();

            async move {
                let mut cursor = cursor?;

                if cursor.buffer.is_empty() && !cursor.exhausted {
                    let page = AdvertisementPage {
                        location_id,
                        classification_id,
                        date,
                        after_id: cursor.after_id,
                        limit,
                    };

                    match repository.find_page(page).await {
                        Ok(batch) => {
                            cursor.exhausted = (batch.len() as i64) < limit;
                            if let Some(last) = batch.last() {
                                cursor.after_id = Some(last.id);
                            }
                            cursor.buffer.extend(batch);
                        }
                        Err(e) => return Some((Err(e), None)),
                    }
                }

                let advertisement = cursor.buffer.pop_front()?;
                Some((Ok(advertisement), Some(cursor)))
            }
        })
    }

    /// Root `<sitemapindex>` of a domain, one entry per non-empty
    /// area/section/date.
    ///
    /// # Errors
    ///
    /// Propagates repository and rendering errors. Cache errors are logged
    /// and treated as a miss.
    pub async fn root_document(&self, domain: &Domain) -> Result<String, AppError> {
        let key = root_sitemap_key(&domain.host);
        if let Some(document) = self.cached(&key).await {
            return Ok(document);
        }

        let pairs: Vec<SitemapPair> = self.enumerate_non_empty_pairs(domain).try_collect().await?;

        let mut entries = Vec::new();
        for pair in &pairs {
            for date in &pair.dates {
                let route = RouteKey::new(RouteName::SitemapLeaf)
                    .with("location", &pair.area.slug)
                    .with("classification", &pair.section.slug)
                    .with("date", date.format("%Y-%m-%d").to_string());

                entries.push(SitemapLink {
                    loc: self.url_generator.absolute_url(&domain.host, &route)?,
                    lastmod: *date,
                });
            }
        }

        let document = self.renderer.render_index(&entries)?;
        self.store(&key, &document).await;

        Ok(document)
    }

    /// Leaf `<urlset>` listing the ads of one location/classification/day.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `date` is not `YYYY-MM-DD`, and
    /// propagates lookup, repository and rendering errors.
    pub async fn leaf_document(
        &self,
        domain: &Domain,
        location: &str,
        classification: &str,
        date: &str,
    ) -> Result<String, AppError> {
        let date = parse_date(date)?;

        let key = leaf_sitemap_key(&domain.host, location, classification, date);
        if let Some(document) = self.cached(&key).await {
            return Ok(document);
        }

        let location = self
            .location_service
            .get_by_slug_and_domain(location, domain)
            .await?;
        let classification = self
            .classification_service
            .get_by_slug(classification)
            .await?;

        let limit = self.settings.max_urls_per_leaf;
        let mut advertisements: Vec<Advertisement> = self
            .enumerate_advertisements(&location, &classification, date)
            .take(limit.saturating_add(1))
            .try_collect()
            .await?;
        if advertisements.len() > limit {
            warn!(
                location = location.slug(),
                classification = classification.slug(),
                %date,
                limit,
                "Leaf sitemap truncated"
            );
            advertisements.truncate(limit);
        }

        let entries = advertisements
            .iter()
            .map(|advertisement| {
                let route = RouteKey::new(RouteName::Advertisement)
                    .with("advertisement", &advertisement.slug);
                Ok(SitemapLink {
                    loc: self.url_generator.absolute_url(&domain.host, &route)?,
                    lastmod: advertisement.created_on(),
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let document = self.renderer.render_urlset(&entries)?;
        self.store(&key, &document).await;

        Ok(document)
    }

    /// Drops every cached sitemap document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the cache backend rejects the call.
    pub async fn invalidate(&self) -> Result<(), AppError> {
        self.cache
            .invalidate_tag(ADVERTISEMENTS_TAG)
            .await
            .map_err(|e| {
                AppError::unavailable(
                    "Failed to invalidate sitemap cache",
                    json!({ "tag": ADVERTISEMENTS_TAG, "reason": e.to_string() }),
                )
            })
    }

    async fn cached(&self, key: &str) -> Option<String> {
        match self.cache.get(key).await {
            Ok(Some(document)) => {
                debug!(key, "Sitemap served from cache");
                Some(document)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Sitemap cache read failed");
                None
            }
        }
    }

    async fn store(&self, key: &str, document: &str) {
        if let Err(e) = self
            .cache
            .set(
                key,
                document,
                &[ADVERTISEMENTS_TAG],
                Some(self.settings.cache_ttl_seconds),
            )
            .await
        {
            warn!(key, error = %e, "Sitemap cache write failed");
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(
            "Date must be formatted as YYYY-MM-DD",
            json!({ "date": value }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Category;
    use crate::domain::repositories::{
        MockAdvertisementRepository, MockClassificationRepository, MockLocationRepository,
    };
    use crate::infrastructure::cache::MemoryCache;
    use crate::infrastructure::rendering::AskamaSitemapRenderer;
    use crate::infrastructure::routing::PathUrlGenerator;
    use chrono::{TimeZone, Utc};
    use futures::StreamExt;

    fn domain() -> Domain {
        Domain::new(1, "ads.example.com".to_string(), true, Utc::now())
    }

    fn area(id: i64, slug: &str) -> Area {
        Area {
            id,
            slug: slug.to_string(),
            title: slug.to_uppercase(),
        }
    }

    fn section(id: i64, slug: &str) -> Section {
        Section {
            id,
            slug: slug.to_string(),
            title: slug.to_uppercase(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn ad(id: i64) -> Advertisement {
        Advertisement {
            id,
            slug: format!("advertisement-{id}"),
            title: format!("Ad {id}"),
            location: Location::Area(area(1, "americas")),
            classification: Classification::Section(section(10, "jobs")),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    struct Mocks {
        locations: MockLocationRepository,
        classifications: MockClassificationRepository,
        advertisements: MockAdvertisementRepository,
        cache: Arc<MemoryCache>,
        settings: SitemapSettings,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                locations: MockLocationRepository::new(),
                classifications: MockClassificationRepository::new(),
                advertisements: MockAdvertisementRepository::new(),
                cache: Arc::new(MemoryCache::new(60)),
                settings: SitemapSettings::default(),
            }
        }

        fn into_service(self) -> SitemapService {
            SitemapService::new(
                Arc::new(LocationService::new(Arc::new(self.locations))),
                Arc::new(ClassificationService::new(Arc::new(self.classifications))),
                Arc::new(self.advertisements),
                self.cache,
                Arc::new(AskamaSitemapRenderer),
                Arc::new(PathUrlGenerator::new("https://ads.example.com/").unwrap()),
                self.settings,
            )
        }
    }

    #[tokio::test]
    async fn test_pairs_skip_empty_combinations() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_areas_by_domain()
            .returning(|_| Ok(vec![area(1, "americas"), area(2, "europe")]));
        mocks
            .classifications
            .expect_find_sections_by_domain()
            .returning(|_| Ok(vec![section(10, "jobs"), section(20, "cars")]));
        mocks
            .advertisements
            .expect_actual_dates()
            .times(4)
            .returning(|area_id, section_id| match (area_id, section_id) {
                (1, 20) => Ok(vec![day(1), day(2)]),
                (2, 10) => Ok(vec![day(3)]),
                _ => Ok(vec![]),
            });

        let service = mocks.into_service();
        let pairs: Vec<SitemapPair> = service
            .enumerate_non_empty_pairs(&domain())
            .try_collect()
            .await
            .unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].area.slug, "americas");
        assert_eq!(pairs[0].section.slug, "cars");
        assert_eq!(pairs[0].dates, vec![day(1), day(2)]);
        assert_eq!(pairs[1].area.slug, "europe");
        assert_eq!(pairs[1].section.slug, "jobs");
    }

    #[tokio::test]
    async fn test_pairs_empty_when_no_ads() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_areas_by_domain()
            .returning(|_| Ok(vec![area(1, "americas")]));
        mocks
            .classifications
            .expect_find_sections_by_domain()
            .returning(|_| Ok(vec![section(10, "jobs")]));
        mocks
            .advertisements
            .expect_actual_dates()
            .returning(|_, _| Ok(vec![]));

        let service = mocks.into_service();
        let mut pairs = Box::pin(service.enumerate_non_empty_pairs(&domain()));

        assert!(pairs.next().await.is_none());
    }

    #[tokio::test]
    async fn test_pairs_stream_is_restartable() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_areas_by_domain()
            .times(2)
            .returning(|_| Ok(vec![area(1, "americas")]));
        mocks
            .classifications
            .expect_find_sections_by_domain()
            .times(2)
            .returning(|_| Ok(vec![section(10, "jobs")]));
        mocks
            .advertisements
            .expect_actual_dates()
            .times(2)
            .returning(|_, _| Ok(vec![day(1)]));

        let service = mocks.into_service();
        let first: Vec<SitemapPair> = service
            .enumerate_non_empty_pairs(&domain())
            .try_collect()
            .await
            .unwrap();
        let second: Vec<SitemapPair> = service
            .enumerate_non_empty_pairs(&domain())
            .try_collect()
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_pairs_error_ends_stream() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_areas_by_domain()
            .returning(|_| Ok(vec![area(1, "americas"), area(2, "europe")]));
        mocks
            .classifications
            .expect_find_sections_by_domain()
            .returning(|_| Ok(vec![section(10, "jobs")]));
        mocks
            .advertisements
            .expect_actual_dates()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let service = mocks.into_service();
        let items: Vec<_> = service.enumerate_non_empty_pairs(&domain()).collect().await;

        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[tokio::test]
    async fn test_advertisements_are_paged_lazily() {
        let mut mocks = Mocks::new();
        mocks.settings.batch_size = 2;
        mocks
            .advertisements
            .expect_find_page()
            .withf(|page| page.after_id.is_none() && page.limit == 2)
            .times(1)
            .returning(|_| Ok(vec![ad(1), ad(2)]));
        mocks
            .advertisements
            .expect_find_page()
            .withf(|page| page.after_id == Some(2))
            .times(1)
            .returning(|_| Ok(vec![ad(3)]));

        let service = mocks.into_service();
        let location = Location::Area(area(1, "americas"));
        let classification = Classification::Section(section(10, "jobs"));

        let ids: Vec<i64> = service
            .enumerate_advertisements(&location, &classification, day(1))
            .map_ok(|ad| ad.id)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_advertisements_full_last_page_needs_one_more_fetch() {
        let mut mocks = Mocks::new();
        mocks.settings.batch_size = 2;
        mocks
            .advertisements
            .expect_find_page()
            .withf(|page| page.after_id.is_none())
            .times(1)
            .returning(|_| Ok(vec![ad(1), ad(2)]));
        mocks
            .advertisements
            .expect_find_page()
            .withf(|page| page.after_id == Some(2))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = mocks.into_service();
        let location = Location::Area(area(1, "americas"));
        let classification = Classification::Section(section(10, "jobs"));

        let ads: Vec<Advertisement> = service
            .enumerate_advertisements(&location, &classification, day(1))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(ads.len(), 2);
    }

    #[tokio::test]
    async fn test_root_document_lists_every_date() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_areas_by_domain()
            .times(1)
            .returning(|_| Ok(vec![area(1, "americas")]));
        mocks
            .classifications
            .expect_find_sections_by_domain()
            .times(1)
            .returning(|_| Ok(vec![section(10, "jobs")]));
        mocks
            .advertisements
            .expect_actual_dates()
            .times(1)
            .returning(|_, _| Ok(vec![day(1), day(2)]));

        let service = mocks.into_service();
        let document = service.root_document(&domain()).await.unwrap();

        assert!(document.contains("https://ads.example.com/sitemap/americas/jobs/2024-05-01"));
        assert!(document.contains("https://ads.example.com/sitemap/americas/jobs/2024-05-02"));

        // Second call is served from the cache; `times(1)` above enforces it.
        let cached = service.root_document(&domain()).await.unwrap();
        assert_eq!(cached, document);
    }

    #[tokio::test]
    async fn test_root_document_rerenders_after_invalidate() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_areas_by_domain()
            .times(2)
            .returning(|_| Ok(vec![area(1, "americas")]));
        mocks
            .classifications
            .expect_find_sections_by_domain()
            .times(2)
            .returning(|_| Ok(vec![section(10, "jobs")]));
        mocks
            .advertisements
            .expect_actual_dates()
            .times(2)
            .returning(|_, _| Ok(vec![day(1)]));

        let service = mocks.into_service();
        service.root_document(&domain()).await.unwrap();
        service.invalidate().await.unwrap();
        service.root_document(&domain()).await.unwrap();
    }

    #[tokio::test]
    async fn test_leaf_document_lists_ads() {
        let mut mocks = Mocks::new();
        mocks
            .locations
            .expect_find_by_slug()
            .returning(|_| Ok(Some(Location::Area(area(1, "americas")))));
        mocks
            .locations
            .expect_is_area_enabled()
            .returning(|_, _| Ok(true));
        mocks.classifications.expect_find_by_slug().returning(|_| {
            Ok(Some(Classification::Category(Category {
                id: 11,
                slug: "it".to_string(),
                real_slug: "it-jobs".to_string(),
                title: "IT".to_string(),
                section: section(10, "jobs"),
            })))
        });
        mocks
            .advertisements
            .expect_find_page()
            .withf(|page| {
                page.location_id == 1 && page.classification_id == 11 && page.date == day(1)
            })
            .returning(|page| {
                if page.after_id.is_none() {
                    Ok(vec![ad(7)])
                } else {
                    Ok(vec![])
                }
            });

        let service = mocks.into_service();
        let document = service
            .leaf_document(&domain(), "americas", "it", "2024-05-01")
            .await
            .unwrap();

        assert!(document.contains("<loc>https://ads.example.com/advertisement/advertisement-7</loc>"));
        assert!(document.contains("<lastmod>2024-05-01</lastmod>"));
    }

    #[tokio::test]
    async fn test_leaf_document_stops_at_url_limit() {
        let mut mocks = Mocks::new();
        mocks.settings = SitemapSettings {
            batch_size: 2,
            max_urls_per_leaf: 2,
            ..SitemapSettings::default()
        };
        mocks
            .locations
            .expect_find_by_slug()
            .returning(|_| Ok(Some(Location::Area(area(1, "americas")))));
        mocks
            .locations
            .expect_is_area_enabled()
            .returning(|_, _| Ok(true));
        mocks
            .classifications
            .expect_find_by_slug()
            .returning(|_| Ok(Some(Classification::Section(section(10, "jobs")))));
        mocks
            .advertisements
            .expect_find_page()
            .times(2)
            .returning(|page| match page.after_id {
                None => Ok(vec![ad(1), ad(2)]),
                Some(2) => Ok(vec![ad(3), ad(4)]),
                Some(_) => Ok(vec![ad(5)]),
            });

        let document = mocks
            .into_service()
            .leaf_document(&domain(), "americas", "jobs", "2024-05-01")
            .await
            .unwrap();

        assert_eq!(document.matches("<url>").count(), 2);
        assert!(document.contains("/advertisement/advertisement-1<"));
        assert!(document.contains("/advertisement/advertisement-2<"));
        assert!(!document.contains("/advertisement/advertisement-3<"));
    }

    #[tokio::test]
    async fn test_leaf_document_rejects_malformed_date() {
        let mut mocks = Mocks::new();
        mocks.locations.expect_find_by_slug().never();

        let result = mocks
            .into_service()
            .leaf_document(&domain(), "americas", "jobs", "01-05-2024")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_leaf_document_served_from_cache_without_lookups() {
        let mocks = Mocks::new();
        let key = leaf_sitemap_key("ads.example.com", "americas", "jobs", day(1));
        mocks
            .cache
            .set(&key, "<urlset/>", &[ADVERTISEMENTS_TAG], None)
            .await
            .unwrap();

        let document = mocks
            .into_service()
            .leaf_document(&domain(), "americas", "jobs", "2024-05-01")
            .await
            .unwrap();

        assert_eq!(document, "<urlset/>");
    }
}
