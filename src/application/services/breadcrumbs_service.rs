//! Breadcrumb trail service.
//!
//! Loads the entities a page is about, resolves their trail with the pure
//! functions in [`crate::domain::breadcrumbs`] and renders every segment to a
//! site-relative path.

use crate::application::services::{ClassificationService, LocationService};
use crate::domain::breadcrumbs::{
    BreadcrumbSegment, resolve_advertisement_path, resolve_classification_path,
    resolve_location_path, resolve_user_path,
};
use crate::domain::entities::Domain;
use crate::domain::repositories::AdvertisementRepository;
use crate::domain::route::UrlGenerator;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// A rendered trail entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub path: String,
    pub title: String,
}

/// Which page a trail is requested for.
///
/// An advertisement wins over a location; a classification is only
/// considered together with a location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbsQuery {
    pub advertisement: Option<String>,
    pub location: Option<String>,
    pub classification: Option<String>,
}

impl BreadcrumbsQuery {
    pub fn advertisement(slug: impl Into<String>) -> Self {
        Self {
            advertisement: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn location(slug: impl Into<String>) -> Self {
        Self {
            location: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn classification(location: impl Into<String>, classification: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            classification: Some(classification.into()),
            ..Self::default()
        }
    }
}

pub struct BreadcrumbsService {
    location_service: Arc<LocationService>,
    classification_service: Arc<ClassificationService>,
    advertisement_repository: Arc<dyn AdvertisementRepository>,
    url_generator: Arc<dyn UrlGenerator>,
}

impl BreadcrumbsService {
    pub fn new(
        location_service: Arc<LocationService>,
        classification_service: Arc<ClassificationService>,
        advertisement_repository: Arc<dyn AdvertisementRepository>,
        url_generator: Arc<dyn UrlGenerator>,
    ) -> Self {
        Self {
            location_service,
            classification_service,
            advertisement_repository,
            url_generator,
        }
    }

    /// Builds the trail for whatever page `query` names.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if neither an advertisement nor a
    /// location is given, and propagates lookup errors otherwise.
    pub async fn resolve(
        &self,
        query: &BreadcrumbsQuery,
        domain: &Domain,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        match query {
            BreadcrumbsQuery {
                advertisement: Some(advertisement),
                ..
            } => self.for_advertisement(advertisement).await,
            BreadcrumbsQuery {
                location: Some(location),
                classification: Some(classification),
                ..
            } => {
                self.for_classification(location, classification, domain)
                    .await
            }
            BreadcrumbsQuery {
                location: Some(location),
                ..
            } => self.for_location(location, domain).await,
            _ => Err(AppError::bad_request(
                "Either an advertisement or a location is required",
                json!({}),
            )),
        }
    }

    /// Trail of an advertisement page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown slug.
    pub async fn for_advertisement(&self, slug: &str) -> Result<Vec<Breadcrumb>, AppError> {
        let advertisement = self
            .advertisement_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Advertisement not found", json!({ "advertisement": slug }))
            })?;

        self.render(&resolve_advertisement_path(&advertisement))
    }

    /// Trail of a location page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] or [`AppError::Unavailable`] from the
    /// location lookup.
    pub async fn for_location(
        &self,
        location: &str,
        domain: &Domain,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        let location = self
            .location_service
            .get_by_slug_and_domain(location, domain)
            .await?;

        self.render(&resolve_location_path(&location))
    }

    /// Trail of a classification listing inside a location.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] or [`AppError::Unavailable`] from either lookup.
    pub async fn for_classification(
        &self,
        location: &str,
        classification: &str,
        domain: &Domain,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        let location = self
            .location_service
            .get_by_slug_and_domain(location, domain)
            .await?;
        let classification = self
            .classification_service
            .get_by_slug(classification)
            .await?;

        self.render(&resolve_classification_path(&location, &classification))
    }

    /// Trail of user pages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only if the home route cannot be rendered.
    pub fn for_user(&self) -> Result<Vec<Breadcrumb>, AppError> {
        self.render(&resolve_user_path())
    }

    fn render(&self, segments: &[BreadcrumbSegment]) -> Result<Vec<Breadcrumb>, AppError> {
        segments
            .iter()
            .map(|segment| {
                Ok(Breadcrumb {
                    path: self.url_generator.path(&segment.route)?,
                    title: segment.title.clone(),
                })
            })
            .collect()
    }
}
