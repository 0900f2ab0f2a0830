//! Handlers for XML sitemap endpoints.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use validator::Validate;

use super::current_domain;
use crate::api::dto::sitemap::LeafSitemapPath;
use crate::error::AppError;
use crate::state::AppState;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Root sitemap index of the requesting domain.
///
/// # Endpoint
///
/// `GET /sitemap.xml`
///
/// Lists one leaf sitemap per area, section and creation day holding ads.
/// Served from cache until advertisement data is invalidated.
pub async fn root_sitemap_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let domain = current_domain(&state, &headers).await?;
    let document = state.sitemap_service.root_document(&domain).await?;

    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], document))
}

/// Leaf sitemap listing the ads of one location, classification and day.
///
/// # Endpoint
///
/// `GET /sitemap/{location}/{classification}/{date}` with `date` as `YYYY-MM-DD`
///
/// # Errors
///
/// Returns 404 `invalid_input` for a malformed date or slug, and
/// `not_found` / `unavailable` from the lookups.
pub async fn leaf_sitemap_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(params): Path<LeafSitemapPath>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let domain = current_domain(&state, &headers).await?;
    let document = state
        .sitemap_service
        .leaf_document(
            &domain,
            &params.location,
            &params.classification,
            &params.date,
        )
        .await?;

    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], document))
}
