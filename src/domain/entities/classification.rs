//! Classification hierarchy: Section → Category → SubCategory.

use std::fmt;

/// Top-level classification (e.g. "Buy and Sell").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: i64,
    pub slug: String,
    pub title: String,
}

/// A category inside a [`Section`].
///
/// `real_slug` is the form used in route paths; `slug` is the lookup key.
/// The two are distinct and must not be swapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub real_slug: String,
    pub title: String,
    pub section: Section,
}

/// A sub-category inside a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCategory {
    pub id: i64,
    pub slug: String,
    pub real_slug: String,
    pub title: String,
    pub category: Category,
}

/// Discriminant of a [`Classification`], as persisted in `classifications.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationKind {
    Section,
    Category,
    SubCategory,
}

impl ClassificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Category => "category",
            Self::SubCategory => "sub_category",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "section" => Some(Self::Section),
            "category" => Some(Self::Category),
            "sub_category" => Some(Self::SubCategory),
            _ => None,
        }
    }

    /// Number of hops from this level up to the root [`Section`].
    pub fn depth(self) -> usize {
        match self {
            Self::Section => 0,
            Self::Category => 1,
            Self::SubCategory => 2,
        }
    }
}

impl fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node of the classification hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Section(Section),
    Category(Category),
    SubCategory(SubCategory),
}

impl Classification {
    pub fn id(&self) -> i64 {
        match self {
            Self::Section(s) => s.id,
            Self::Category(c) => c.id,
            Self::SubCategory(s) => s.id,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Section(s) => &s.slug,
            Self::Category(c) => &c.slug,
            Self::SubCategory(s) => &s.slug,
        }
    }

    /// Route slug of a category or sub-category. Sections have none.
    pub fn real_slug(&self) -> Option<&str> {
        match self {
            Self::Section(_) => None,
            Self::Category(c) => Some(&c.real_slug),
            Self::SubCategory(s) => Some(&s.real_slug),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Section(s) => &s.title,
            Self::Category(c) => &c.title,
            Self::SubCategory(s) => &s.title,
        }
    }

    pub fn kind(&self) -> ClassificationKind {
        match self {
            Self::Section(_) => ClassificationKind::Section,
            Self::Category(_) => ClassificationKind::Category,
            Self::SubCategory(_) => ClassificationKind::SubCategory,
        }
    }

    /// Hops from this node up to its root [`Section`].
    pub fn depth(&self) -> usize {
        self.kind().depth()
    }

    /// Returns the parent node, or `None` for a [`Section`].
    pub fn parent(&self) -> Option<Classification> {
        match self {
            Self::Section(_) => None,
            Self::Category(c) => Some(Self::Section(c.section.clone())),
            Self::SubCategory(s) => Some(Self::Category(s.category.clone())),
        }
    }

    /// Returns the root [`Section`] of this node.
    pub fn section(&self) -> &Section {
        match self {
            Self::Section(s) => s,
            Self::Category(c) => &c.section,
            Self::SubCategory(s) => &s.category.section,
        }
    }
}

impl From<Section> for Classification {
    fn from(section: Section) -> Self {
        Self::Section(section)
    }
}

impl From<Category> for Classification {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

impl From<SubCategory> for Classification {
    fn from(sub_category: SubCategory) -> Self {
        Self::SubCategory(sub_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_category() -> SubCategory {
        SubCategory {
            id: 3,
            slug: "laptops".to_string(),
            real_slug: "laptops-sub".to_string(),
            title: "Laptops".to_string(),
            category: Category {
                id: 2,
                slug: "electronics".to_string(),
                real_slug: "electronics-cat".to_string(),
                title: "Electronics".to_string(),
                section: Section {
                    id: 1,
                    slug: "buy-and-sell".to_string(),
                    title: "Buy and Sell".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_real_slug_is_distinct_from_slug() {
        let node = Classification::from(sub_category());

        assert_eq!(node.slug(), "laptops");
        assert_eq!(node.real_slug(), Some("laptops-sub"));
    }

    #[test]
    fn test_section_has_no_real_slug_or_parent() {
        let section = Classification::from(sub_category().category.section);

        assert!(section.real_slug().is_none());
        assert!(section.parent().is_none());
    }

    #[test]
    fn test_parent_chain_reaches_section_in_two_hops() {
        let mut node = Classification::from(sub_category());
        let mut hops = 0;

        while let Some(parent) = node.parent() {
            node = parent;
            hops += 1;
        }

        assert_eq!(hops, 2);
        assert_eq!(node.kind(), ClassificationKind::Section);
    }

    #[test]
    fn test_section_accessor_from_any_depth() {
        let node = Classification::from(sub_category());
        assert_eq!(node.section().slug, "buy-and-sell");
        assert_eq!(node.kind().depth(), 2);
    }
}
