//! DTOs for breadcrumb endpoints.

use super::SLUG_REGEX;
use crate::application::services::{Breadcrumb, BreadcrumbsQuery};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `/api/breadcrumbs/advertisement/{slug}`
#[derive(Debug, Deserialize, Validate)]
pub struct AdvertisementPath {
    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub slug: String,
}

/// `/api/breadcrumbs/location/{location}`
#[derive(Debug, Deserialize, Validate)]
pub struct LocationPath {
    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub location: String,
}

/// `/api/breadcrumbs/location/{location}/classification/{classification}`
#[derive(Debug, Deserialize, Validate)]
pub struct ClassificationPath {
    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub location: String,

    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub classification: String,
}

/// Query form of `/api/breadcrumbs`; every field is optional and the
/// service picks the most specific page.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BreadcrumbsParams {
    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub advertisement: Option<String>,

    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub classification: Option<String>,
}

impl From<BreadcrumbsParams> for BreadcrumbsQuery {
    fn from(params: BreadcrumbsParams) -> Self {
        Self {
            advertisement: params.advertisement,
            location: params.location,
            classification: params.classification,
        }
    }
}

/// One trail entry as returned to clients.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub path: String,
    pub title: String,
}

impl From<Breadcrumb> for BreadcrumbItem {
    fn from(breadcrumb: Breadcrumb) -> Self {
        Self {
            path: breadcrumb.path,
            title: breadcrumb.title,
        }
    }
}
