//! Advertisement entity: a single classified ad.

use chrono::{DateTime, NaiveDate, Utc};

use super::{Classification, Location};

/// A published classified advertisement.
///
/// The location and classification may be of any depth; an ad filed
/// directly under a [`crate::domain::entities::Section`] is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub location: Location,
    pub classification: Classification,
    pub created_at: DateTime<Utc>,
}

impl Advertisement {
    /// Calendar day (UTC) used to bucket the ad into a leaf sitemap.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}
