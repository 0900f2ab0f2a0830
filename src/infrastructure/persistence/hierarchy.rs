//! Loading and assembling hierarchy chains from self-referencing tables.
//!
//! Both hierarchy tables store one row per node with a `parent_id`. A
//! recursive CTE fetches a node and its ancestors root-first; the assemblers
//! below fold those rows into the nested entity values and reject any chain
//! whose levels are out of order.

use serde_json::json;
use sqlx::PgPool;

use crate::domain::entities::{
    Area, Category, City, Classification, ClassificationKind, Country, Location, LocationKind,
    Region, Section, SubCategory,
};
use crate::error::AppError;

/// One `locations` row of an ancestry chain.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub kind: String,
    pub slug: String,
    pub title: String,
}

/// One `classifications` row of an ancestry chain.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClassificationRow {
    pub id: i64,
    pub kind: String,
    pub slug: String,
    pub real_slug: Option<String>,
    pub title: String,
}

/// How the leaf node of a chain is selected.
#[derive(Debug, Clone, Copy)]
pub enum ChainStart<'a> {
    Slug(&'a str),
    Id(i64),
}

fn chain_sql(table: &str, columns: &str, start: &ChainStart<'_>) -> String {
    let condition = match start {
        ChainStart::Slug(_) => "slug = $1",
        ChainStart::Id(_) => "id = $1",
    };
    let node_columns = columns
        .split(", ")
        .map(|c| format!("n.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
        WITH RECURSIVE chain AS (
            SELECT {columns}, parent_id, 0 AS depth
            FROM {table}
            WHERE {condition}
            UNION ALL
            SELECT {node_columns}, n.parent_id, chain.depth + 1
            FROM {table} n
            JOIN chain ON n.id = chain.parent_id
            WHERE chain.depth < 3
        )
        SELECT {columns}
        FROM chain
        ORDER BY depth DESC
        "#
    )
}

/// Fetches a location and its ancestors, root first. Empty if not found.
pub async fn fetch_location_chain(
    pool: &PgPool,
    start: ChainStart<'_>,
) -> Result<Vec<LocationRow>, AppError> {
    let sql = chain_sql("locations", "id, kind, slug, title", &start);
    let query = sqlx::query_as::<_, LocationRow>(&sql);
    let rows = match start {
        ChainStart::Slug(slug) => query.bind(slug).fetch_all(pool).await?,
        ChainStart::Id(id) => query.bind(id).fetch_all(pool).await?,
    };
    Ok(rows)
}

/// Fetches a classification and its ancestors, root first. Empty if not found.
pub async fn fetch_classification_chain(
    pool: &PgPool,
    start: ChainStart<'_>,
) -> Result<Vec<ClassificationRow>, AppError> {
    let sql = chain_sql("classifications", "id, kind, slug, real_slug, title", &start);
    let query = sqlx::query_as::<_, ClassificationRow>(&sql);
    let rows = match start {
        ChainStart::Slug(slug) => query.bind(slug).fetch_all(pool).await?,
        ChainStart::Id(id) => query.bind(id).fetch_all(pool).await?,
    };
    Ok(rows)
}

fn malformed(table: &str, leaf: &str, found: &str, parent: Option<String>) -> AppError {
    AppError::internal(
        "Malformed hierarchy chain",
        json!({ "table": table, "slug": leaf, "kind": found, "parent_kind": parent }),
    )
}

/// Folds root-first rows into a [`Location`].
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the rows are empty, contain an unknown
/// kind, or do not descend Area → Country → City → Region one level at a time.
pub fn assemble_location(rows: Vec<LocationRow>) -> Result<Location, AppError> {
    let mut current: Option<Location> = None;

    for row in rows {
        let kind = LocationKind::parse(&row.kind)
            .ok_or_else(|| malformed("locations", &row.slug, &row.kind, None))?;

        let LocationRow { id, slug, title, .. } = row;
        current = Some(match (kind, current) {
            (LocationKind::Area, None) => Location::Area(Area { id, slug, title }),
            (LocationKind::Country, Some(Location::Area(area))) => Location::Country(Country {
                id,
                slug,
                title,
                area,
            }),
            (LocationKind::City, Some(Location::Country(country))) => Location::City(City {
                id,
                slug,
                title,
                country,
            }),
            (LocationKind::Region, Some(Location::City(city))) => Location::Region(Region {
                id,
                slug,
                title,
                city,
            }),
            (kind, parent) => {
                return Err(malformed(
                    "locations",
                    &slug,
                    kind.as_str(),
                    parent.map(|p| p.kind().to_string()),
                ));
            }
        });
    }

    current.ok_or_else(|| AppError::internal("Empty hierarchy chain", json!({ "table": "locations" })))
}

/// Folds root-first rows into a [`Classification`].
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the rows are empty, out of order, or a
/// category/sub-category lacks its `real_slug`.
pub fn assemble_classification(rows: Vec<ClassificationRow>) -> Result<Classification, AppError> {
    let mut current: Option<Classification> = None;

    for row in rows {
        let kind = ClassificationKind::parse(&row.kind)
            .ok_or_else(|| malformed("classifications", &row.slug, &row.kind, None))?;

        let ClassificationRow {
            id,
            slug,
            real_slug,
            title,
            ..
        } = row;

        current = Some(match (kind, current, real_slug) {
            (ClassificationKind::Section, None, _) => {
                Classification::Section(Section { id, slug, title })
            }
            (ClassificationKind::Category, Some(Classification::Section(section)), Some(real_slug)) => {
                Classification::Category(Category {
                    id,
                    slug,
                    real_slug,
                    title,
                    section,
                })
            }
            (
                ClassificationKind::SubCategory,
                Some(Classification::Category(category)),
                Some(real_slug),
            ) => Classification::SubCategory(SubCategory {
                id,
                slug,
                real_slug,
                title,
                category,
            }),
            (kind, parent, _) => {
                return Err(malformed(
                    "classifications",
                    &slug,
                    kind.as_str(),
                    parent.map(|p| p.kind().to_string()),
                ));
            }
        });
    }

    current.ok_or_else(|| {
        AppError::internal("Empty hierarchy chain", json!({ "table": "classifications" }))
    })
}
