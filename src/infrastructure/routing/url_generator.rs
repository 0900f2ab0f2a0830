//! Pattern-based URL generation for site routes.

use serde_json::json;
use url::Url;

use crate::domain::route::{RouteKey, RouteName, UrlGenerator};
use crate::error::AppError;

enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

use Segment::{Literal, Param};

/// Path pattern of each route, as a list of segments below the site root.
fn pattern(name: RouteName) -> &'static [Segment] {
    match name {
        RouteName::Home => &[],
        RouteName::Location => &[Param("location")],
        RouteName::SectionByLocation => &[Param("location"), Param("section")],
        RouteName::CategoryByLocation => {
            &[Param("location"), Param("section"), Param("category")]
        }
        RouteName::SubCategoryByLocation => &[
            Param("location"),
            Param("section"),
            Param("category"),
            Param("sub_category"),
        ],
        RouteName::Advertisement => &[Literal("advertisement"), Param("advertisement")],
        RouteName::SitemapLeaf => &[
            Literal("sitemap"),
            Param("location"),
            Param("classification"),
            Param("date"),
        ],
    }
}

/// Generates URLs below a public base URL (e.g. `https://ads.example.com/`).
///
/// The base supplies the scheme and path prefix. Absolute URLs are moved onto
/// the requested tenant host; the base port is only kept when that host is
/// the base host itself. Parameter values are percent-encoded as single path
/// segments.
#[derive(Debug, Clone)]
pub struct PathUrlGenerator {
    base: Url,
}

impl PathUrlGenerator {
    /// Creates a generator rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL cannot be parsed or cannot carry a path.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base = Url::parse(base_url).map_err(|e| {
            AppError::internal(
                "Invalid public base URL",
                json!({ "url": base_url, "reason": e.to_string() }),
            )
        })?;

        if base.cannot_be_a_base() {
            return Err(AppError::internal(
                "Public base URL cannot carry a path",
                json!({ "url": base_url }),
            ));
        }

        Ok(Self { base })
    }

    fn build(&self, route: &RouteKey) -> Result<Url, AppError> {
        let segments = pattern(route.name);
        let mut url = self.base.clone();
        if segments.is_empty() {
            return Ok(url);
        }

        let mut values = Vec::with_capacity(segments.len());
        for segment in segments {
            let value = match segment {
                Literal(text) => *text,
                Param(name) => route.param(name).ok_or_else(|| {
                    AppError::internal(
                        "Missing route parameter",
                        json!({ "route": route.name.as_str(), "param": name }),
                    )
                })?,
            };
            values.push(value);
        }

        url.path_segments_mut()
            .map_err(|_| AppError::internal("Public base URL cannot carry a path", json!({})))?
            .pop_if_empty()
            .extend(values);

        Ok(url)
    }
}

impl UrlGenerator for PathUrlGenerator {
    fn path(&self, route: &RouteKey) -> Result<String, AppError> {
        Ok(self.build(route)?.path().to_string())
    }

    fn absolute_url(&self, host: &str, route: &RouteKey) -> Result<String, AppError> {
        let mut url = self.build(route)?;
        if url.host_str() == Some(host) {
            return Ok(url.into());
        }

        let invalid_host = || AppError::internal("Invalid domain host", json!({ "host": host }));
        url.set_host(Some(host)).map_err(|_| invalid_host())?;
        url.set_port(None).map_err(|_| invalid_host())?;

        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PathUrlGenerator {
        PathUrlGenerator::new("https://ads.example.com/").unwrap()
    }

    #[test]
    fn test_home_is_site_root() {
        let path = generator().path(&RouteKey::new(RouteName::Home)).unwrap();
        assert_eq!(path, "/");
    }

    #[test]
    fn test_sub_category_path() {
        let route = RouteKey::new(RouteName::SubCategoryByLocation)
            .with("location", "americas")
            .with("section", "buy-and-sell")
            .with("category", "electronics-cat")
            .with("sub_category", "laptops-sub");

        assert_eq!(
            generator().path(&route).unwrap(),
            "/americas/buy-and-sell/electronics-cat/laptops-sub"
        );
    }

    #[test]
    fn test_absolute_sitemap_leaf_url() {
        let route = RouteKey::new(RouteName::SitemapLeaf)
            .with("location", "americas")
            .with("classification", "jobs")
            .with("date", "2024-05-01");

        assert_eq!(
            generator().absolute_url("ads.example.com", &route).unwrap(),
            "https://ads.example.com/sitemap/americas/jobs/2024-05-01"
        );
    }

    #[test]
    fn test_absolute_url_uses_tenant_host() {
        let generator = PathUrlGenerator::new("http://localhost:3000/classifieds/").unwrap();
        let route = RouteKey::new(RouteName::Advertisement).with("advertisement", "bike-42");

        assert_eq!(
            generator.absolute_url("other.example.com", &route).unwrap(),
            "http://other.example.com/classifieds/advertisement/bike-42"
        );
        assert_eq!(
            generator.absolute_url("localhost", &route).unwrap(),
            "http://localhost:3000/classifieds/advertisement/bike-42"
        );
    }

    #[test]
    fn test_absolute_url_rejects_invalid_host() {
        let route = RouteKey::new(RouteName::Home);
        let err = generator().absolute_url("bad host", &route).unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_values_are_encoded_as_single_segments() {
        let route = RouteKey::new(RouteName::Location).with("location", "a/b c");
        assert_eq!(generator().path(&route).unwrap(), "/a%2Fb%20c");
    }

    #[test]
    fn test_missing_param_is_internal_error() {
        let route = RouteKey::new(RouteName::SectionByLocation).with("location", "americas");
        let err = generator().path(&route).unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let generator = PathUrlGenerator::new("https://example.com/classifieds/").unwrap();
        let route = RouteKey::new(RouteName::Location).with("location", "americas");
        assert_eq!(generator.path(&route).unwrap(), "/classifieds/americas");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(PathUrlGenerator::new("mailto:someone@example.com").is_err());
        assert!(PathUrlGenerator::new("not a url").is_err());
    }
}
