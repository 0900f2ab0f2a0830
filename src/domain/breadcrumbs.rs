//! Breadcrumb trail resolution over the location and classification trees.
//!
//! Every function here is pure and total: it only walks the embedded parent
//! links of its inputs. Segments are always emitted root-to-leaf, after a
//! leading "Home" segment.

use crate::domain::entities::{Advertisement, Area, Classification, Location, Section};
use crate::domain::route::{RouteKey, RouteName};

/// Title of the leading segment of every trail.
pub const HOME_TITLE: &str = "Home";

/// One step of a navigation trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbSegment {
    pub title: String,
    pub route: RouteKey,
}

impl BreadcrumbSegment {
    fn new(title: impl Into<String>, route: RouteKey) -> Self {
        Self {
            title: title.into(),
            route,
        }
    }

    fn home() -> Self {
        Self::new(HOME_TITLE, RouteKey::new(RouteName::Home))
    }

    fn location(slug: &str, title: &str) -> Self {
        Self::new(
            title,
            RouteKey::new(RouteName::Location).with("location", slug),
        )
    }
}

/// Trail for a location page: Home, then every ancestor down to `location`.
pub fn resolve_location_path(location: &Location) -> Vec<BreadcrumbSegment> {
    let mut trail = vec![BreadcrumbSegment::home()];

    let push_area = |trail: &mut Vec<BreadcrumbSegment>, area: &Area| {
        trail.push(BreadcrumbSegment::location(&area.slug, &area.title));
    };

    match location {
        Location::Area(area) => push_area(&mut trail, area),
        Location::Country(country) => {
            push_area(&mut trail, &country.area);
            trail.push(BreadcrumbSegment::location(&country.slug, &country.title));
        }
        Location::City(city) => {
            push_area(&mut trail, &city.country.area);
            trail.push(BreadcrumbSegment::location(
                &city.country.slug,
                &city.country.title,
            ));
            trail.push(BreadcrumbSegment::location(&city.slug, &city.title));
        }
        Location::Region(region) => {
            let city = &region.city;
            push_area(&mut trail, &city.country.area);
            trail.push(BreadcrumbSegment::location(
                &city.country.slug,
                &city.country.title,
            ));
            trail.push(BreadcrumbSegment::location(&city.slug, &city.title));
            trail.push(BreadcrumbSegment::location(&region.slug, &region.title));
        }
    }

    trail
}

/// Trail for a classification listing inside a location.
///
/// Classification segments are parameterised by the slug of `location`
/// itself, not by its root area.
pub fn resolve_classification_path(
    location: &Location,
    classification: &Classification,
) -> Vec<BreadcrumbSegment> {
    let mut trail = resolve_location_path(location);
    let location_slug = location.slug();

    match classification {
        Classification::Section(section) => {
            trail.push(section_segment(location_slug, section));
        }
        Classification::Category(category) => {
            trail.push(section_segment(location_slug, &category.section));
            trail.push(BreadcrumbSegment::new(
                &category.title,
                RouteKey::new(RouteName::CategoryByLocation)
                    .with("location", location_slug)
                    .with("section", &category.section.slug)
                    .with("category", &category.real_slug),
            ));
        }
        Classification::SubCategory(sub_category) => {
            let category = &sub_category.category;
            trail.push(section_segment(location_slug, &category.section));
            trail.push(BreadcrumbSegment::new(
                &category.title,
                RouteKey::new(RouteName::CategoryByLocation)
                    .with("location", location_slug)
                    .with("section", &category.section.slug)
                    .with("category", &category.real_slug),
            ));
            // Titled by its route slug rather than its display title.
            trail.push(BreadcrumbSegment::new(
                &sub_category.real_slug,
                RouteKey::new(RouteName::SubCategoryByLocation)
                    .with("location", location_slug)
                    .with("section", &category.section.slug)
                    .with("category", &category.real_slug)
                    .with("sub_category", &sub_category.real_slug),
            ));
        }
    }

    trail
}

/// Trail for an advertisement page.
pub fn resolve_advertisement_path(advertisement: &Advertisement) -> Vec<BreadcrumbSegment> {
    resolve_classification_path(&advertisement.location, &advertisement.classification)
}

/// Trail for user pages: Home only.
pub fn resolve_user_path() -> Vec<BreadcrumbSegment> {
    vec![BreadcrumbSegment::home()]
}

fn section_segment(location_slug: &str, section: &Section) -> BreadcrumbSegment {
    BreadcrumbSegment::new(
        &section.title,
        RouteKey::new(RouteName::SectionByLocation)
            .with("location", location_slug)
            .with("section", &section.slug),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Category, City, Country, Region, SubCategory};
    use chrono::Utc;

    fn americas() -> Area {
        Area {
            id: 1,
            slug: "americas".to_string(),
            title: "Americas".to_string(),
        }
    }

    fn springfield() -> City {
        City {
            id: 3,
            slug: "springfield".to_string(),
            title: "Springfield".to_string(),
            country: Country {
                id: 2,
                slug: "usa".to_string(),
                title: "USA".to_string(),
                area: americas(),
            },
        }
    }

    fn downtown() -> Region {
        Region {
            id: 4,
            slug: "downtown".to_string(),
            title: "Downtown".to_string(),
            city: springfield(),
        }
    }

    fn buy_and_sell() -> Section {
        Section {
            id: 10,
            slug: "buy-and-sell".to_string(),
            title: "Buy and Sell".to_string(),
        }
    }

    fn electronics() -> Category {
        Category {
            id: 11,
            slug: "electronics".to_string(),
            real_slug: "electronics-cat".to_string(),
            title: "Electronics".to_string(),
            section: buy_and_sell(),
        }
    }

    fn laptops() -> SubCategory {
        SubCategory {
            id: 12,
            slug: "laptops".to_string(),
            real_slug: "laptops-sub".to_string(),
            title: "Laptops".to_string(),
            category: electronics(),
        }
    }

    fn titles(trail: &[BreadcrumbSegment]) -> Vec<&str> {
        trail.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_area_path_has_home_and_area() {
        let trail = resolve_location_path(&Location::Area(americas()));

        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].route, RouteKey::new(RouteName::Home));
        assert_eq!(trail[1].route.name, RouteName::Location);
        assert_eq!(trail[1].route.param("location"), Some("americas"));
    }

    #[test]
    fn test_city_path_matches_springfield_scenario() {
        let trail = resolve_location_path(&Location::City(springfield()));

        assert_eq!(titles(&trail), ["Home", "Americas", "USA", "Springfield"]);
        let slugs: Vec<_> = trail[1..]
            .iter()
            .map(|s| s.route.param("location").unwrap())
            .collect();
        assert_eq!(slugs, ["americas", "usa", "springfield"]);
    }

    #[test]
    fn test_region_path_is_root_to_leaf() {
        let trail = resolve_location_path(&Location::Region(downtown()));

        assert_eq!(trail.len(), 5);
        assert_eq!(
            titles(&trail),
            ["Home", "Americas", "USA", "Springfield", "Downtown"]
        );
    }

    #[test]
    fn test_section_adds_exactly_one_segment() {
        let location = Location::Country(springfield().country);
        let base = resolve_location_path(&location).len();
        let trail = resolve_classification_path(&location, &buy_and_sell().into());

        assert_eq!(trail.len(), base + 1);
        let last = trail.last().unwrap();
        assert_eq!(last.title, "Buy and Sell");
        assert_eq!(last.route.name, RouteName::SectionByLocation);
        assert_eq!(last.route.param("location"), Some("usa"));
        assert_eq!(last.route.param("section"), Some("buy-and-sell"));
    }

    #[test]
    fn test_category_uses_real_slug_in_route() {
        let location = Location::Area(americas());
        let trail = resolve_classification_path(&location, &electronics().into());

        assert_eq!(titles(&trail), ["Home", "Americas", "Buy and Sell", "Electronics"]);
        let category = &trail[3].route;
        assert_eq!(category.name, RouteName::CategoryByLocation);
        assert_eq!(category.param("section"), Some("buy-and-sell"));
        assert_eq!(category.param("category"), Some("electronics-cat"));
    }

    #[test]
    fn test_sub_category_matches_laptops_scenario() {
        let location = Location::Area(americas());
        let trail = resolve_classification_path(&location, &laptops().into());

        assert_eq!(
            titles(&trail),
            ["Home", "Americas", "Buy and Sell", "Electronics", "laptops-sub"]
        );

        let last = &trail[4].route;
        assert_eq!(last.name, RouteName::SubCategoryByLocation);
        assert_eq!(last.param("location"), Some("americas"));
        assert_eq!(last.param("section"), Some("buy-and-sell"));
        assert_eq!(last.param("category"), Some("electronics-cat"));
        assert_eq!(last.param("sub_category"), Some("laptops-sub"));
    }

    #[test]
    fn test_sub_category_title_is_real_slug_not_title() {
        let location = Location::Region(downtown());
        let base = resolve_location_path(&location).len();
        let trail = resolve_classification_path(&location, &laptops().into());

        assert_eq!(trail.len(), base + 3);
        assert_eq!(trail.last().unwrap().title, "laptops-sub");
        assert_ne!(trail.last().unwrap().title, laptops().title);
    }

    #[test]
    fn test_advertisement_path_delegates_to_classification_path() {
        let ad = Advertisement {
            id: 1,
            slug: "advertisement-25_25".to_string(),
            title: "Used laptop".to_string(),
            location: Location::City(springfield()),
            classification: laptops().into(),
            created_at: Utc::now(),
        };

        assert_eq!(
            resolve_advertisement_path(&ad),
            resolve_classification_path(&ad.location, &ad.classification)
        );
    }

    #[test]
    fn test_user_path_is_home_only() {
        let trail = resolve_user_path();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].title, HOME_TITLE);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let location = Location::Region(downtown());
        let classification = Classification::from(electronics());

        assert_eq!(
            resolve_classification_path(&location, &classification),
            resolve_classification_path(&location, &classification)
        );
    }
}
