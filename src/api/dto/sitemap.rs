//! DTOs for sitemap endpoints.

use super::SLUG_REGEX;
use serde::Deserialize;
use validator::Validate;

/// `/sitemap/{location}/{classification}/{date}`
///
/// `date` is parsed by the sitemap service, which owns its format.
#[derive(Debug, Deserialize, Validate)]
pub struct LeafSitemapPath {
    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub location: String,

    #[validate(length(min = 1, max = 255), regex(path = *SLUG_REGEX))]
    pub classification: String,

    #[validate(length(equal = 10))]
    pub date: String,
}
