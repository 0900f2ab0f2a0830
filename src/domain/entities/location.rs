//! Location hierarchy: Area → Country → City → Region.

use std::fmt;

/// Top-level location (e.g. a continent). Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: i64,
    pub slug: String,
    pub title: String,
}

/// A country, owned by exactly one [`Area`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub area: Area,
}

/// A city, owned by exactly one [`Country`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub country: Country,
}

/// A region inside a [`City`]. Deepest level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub city: City,
}

/// Discriminant of a [`Location`], as persisted in the `locations.kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Area,
    Country,
    City,
    Region,
}

impl LocationKind {
    /// Column value used by the persistence layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Country => "country",
            Self::City => "city",
            Self::Region => "region",
        }
    }

    /// Parses a persisted `kind` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "area" => Some(Self::Area),
            "country" => Some(Self::Country),
            "city" => Some(Self::City),
            "region" => Some(Self::Region),
            _ => None,
        }
    }

    /// Number of hops from this level up to the root [`Area`].
    pub fn depth(self) -> usize {
        match self {
            Self::Area => 0,
            Self::Country => 1,
            Self::City => 2,
            Self::Region => 3,
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node of the location hierarchy.
///
/// Parents are embedded by value, so a `Location` always carries its full
/// ancestry and never needs a second lookup to walk to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Area(Area),
    Country(Country),
    City(City),
    Region(Region),
}

impl Location {
    pub fn id(&self) -> i64 {
        match self {
            Self::Area(a) => a.id,
            Self::Country(c) => c.id,
            Self::City(c) => c.id,
            Self::Region(r) => r.id,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Area(a) => &a.slug,
            Self::Country(c) => &c.slug,
            Self::City(c) => &c.slug,
            Self::Region(r) => &r.slug,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Area(a) => &a.title,
            Self::Country(c) => &c.title,
            Self::City(c) => &c.title,
            Self::Region(r) => &r.title,
        }
    }

    pub fn kind(&self) -> LocationKind {
        match self {
            Self::Area(_) => LocationKind::Area,
            Self::Country(_) => LocationKind::Country,
            Self::City(_) => LocationKind::City,
            Self::Region(_) => LocationKind::Region,
        }
    }

    /// Hops from this node up to its root [`Area`].
    pub fn depth(&self) -> usize {
        self.kind().depth()
    }

    /// Returns the parent node, or `None` for an [`Area`].
    pub fn parent(&self) -> Option<Location> {
        match self {
            Self::Area(_) => None,
            Self::Country(c) => Some(Self::Area(c.area.clone())),
            Self::City(c) => Some(Self::Country(c.country.clone())),
            Self::Region(r) => Some(Self::City(r.city.clone())),
        }
    }

    /// Returns the root [`Area`] of this node.
    pub fn area(&self) -> &Area {
        match self {
            Self::Area(a) => a,
            Self::Country(c) => &c.area,
            Self::City(c) => &c.country.area,
            Self::Region(r) => &r.city.country.area,
        }
    }
}

impl From<Area> for Location {
    fn from(area: Area) -> Self {
        Self::Area(area)
    }
}

impl From<Country> for Location {
    fn from(country: Country) -> Self {
        Self::Country(country)
    }
}

impl From<City> for Location {
    fn from(city: City) -> Self {
        Self::City(city)
    }
}

impl From<Region> for Location {
    fn from(region: Region) -> Self {
        Self::Region(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region {
            id: 4,
            slug: "downtown".to_string(),
            title: "Downtown".to_string(),
            city: City {
                id: 3,
                slug: "springfield".to_string(),
                title: "Springfield".to_string(),
                country: Country {
                    id: 2,
                    slug: "usa".to_string(),
                    title: "USA".to_string(),
                    area: Area {
                        id: 1,
                        slug: "americas".to_string(),
                        title: "Americas".to_string(),
                    },
                },
            },
        }
    }

    #[test]
    fn test_parent_chain_reaches_area_in_three_hops() {
        let mut node = Location::from(region());
        let mut hops = 0;

        while let Some(parent) = node.parent() {
            node = parent;
            hops += 1;
        }

        assert_eq!(hops, 3);
        assert_eq!(node.kind(), LocationKind::Area);
        assert_eq!(node.slug(), "americas");
    }

    #[test]
    fn test_area_has_no_parent() {
        let area = Location::from(region().city.country.area);
        assert!(area.parent().is_none());
        assert_eq!(area.kind().depth(), 0);
    }

    #[test]
    fn test_accessors_follow_variant() {
        let city = Location::from(region().city);

        assert_eq!(city.id(), 3);
        assert_eq!(city.slug(), "springfield");
        assert_eq!(city.title(), "Springfield");
        assert_eq!(city.area().slug, "americas");
        assert_eq!(city.kind(), LocationKind::City);
    }

    #[test]
    fn test_kind_parse_round_trips_known_values() {
        for kind in [
            LocationKind::Area,
            LocationKind::Country,
            LocationKind::City,
            LocationKind::Region,
        ] {
            assert_eq!(LocationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(LocationKind::parse("district"), None);
    }
}
