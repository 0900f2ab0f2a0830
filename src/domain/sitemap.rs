//! Sitemap enumeration items and the document rendering contract.

use chrono::NaiveDate;

use crate::domain::entities::{Area, Section};
use crate::error::AppError;

/// Most `<url>` entries one sitemap document may carry.
pub const MAX_SITEMAP_URLS: usize = 50_000;

/// An area/section pair holding at least one advertisement.
///
/// `dates` are the distinct creation days of those ads, ascending and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapPair {
    pub area: Area,
    pub section: Section,
    pub dates: Vec<NaiveDate>,
}

/// One `<sitemap>` or `<url>` entry of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapLink {
    pub loc: String,
    pub lastmod: NaiveDate,
}

/// Renders sitemap XML documents.
///
/// # Implementations
///
/// - [`crate::infrastructure::rendering::AskamaSitemapRenderer`] - Askama templates
pub trait SitemapRenderer: Send + Sync {
    /// Renders a `<sitemapindex>` pointing at leaf sitemaps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if rendering fails.
    fn render_index(&self, entries: &[SitemapLink]) -> Result<String, AppError>;

    /// Renders a `<urlset>` of advertisement pages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if rendering fails.
    fn render_urlset(&self, entries: &[SitemapLink]) -> Result<String, AppError>;
}
