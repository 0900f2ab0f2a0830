//! Structured route descriptors and the URL generation contract.
//!
//! The core never builds URLs itself. It emits a [`RouteKey`] (route name plus
//! ordered slug parameters) and leaves rendering to a [`UrlGenerator`].

use std::fmt;

use crate::error::AppError;

/// Named routes of the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Location,
    SectionByLocation,
    CategoryByLocation,
    SubCategoryByLocation,
    Advertisement,
    SitemapLeaf,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Location => "location",
            Self::SectionByLocation => "section-by-location",
            Self::CategoryByLocation => "category-by-location",
            Self::SubCategoryByLocation => "subcategory-by-location",
            Self::Advertisement => "advertisement",
            Self::SitemapLeaf => "sitemap-leaf",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route name with its parameters, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteKey {
    pub name: RouteName,
    pub params: Vec<(&'static str, String)>,
}

impl RouteKey {
    /// A route without parameters.
    pub fn new(name: RouteName) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn with(mut self, param: &'static str, value: impl Into<String>) -> Self {
        self.params.push((param, value.into()));
        self
    }

    /// Looks up a parameter value by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Turns a [`RouteKey`] into a renderable URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::routing::PathUrlGenerator`] - pattern-based generator
pub trait UrlGenerator: Send + Sync {
    /// Site-relative path, e.g. `/americas/buy-and-sell`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the route is missing a parameter its
    /// pattern requires.
    fn path(&self, route: &RouteKey) -> Result<String, AppError>;

    /// Absolute URL on `host`, for documents consumed outside the site
    /// (sitemaps). Every tenant domain links to its own pages.
    ///
    /// # Errors
    ///
    /// Same as [`UrlGenerator::path`], plus [`AppError::Internal`] if `host`
    /// is not a valid URL host.
    fn absolute_url(&self, host: &str, route: &RouteKey) -> Result<String, AppError>;
}
