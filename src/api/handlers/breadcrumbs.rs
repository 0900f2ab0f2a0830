//! Handlers for breadcrumb trail endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use validator::Validate;

use super::current_domain;
use crate::api::dto::breadcrumbs::{
    AdvertisementPath, BreadcrumbItem, BreadcrumbsParams, ClassificationPath, LocationPath,
};
use crate::application::services::{Breadcrumb, BreadcrumbsQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Trail of an advertisement page.
///
/// # Endpoint
///
/// `GET /api/breadcrumbs/advertisement/{slug}`
///
/// # Response
///
/// ```json
/// [
///   { "path": "/", "title": "Home" },
///   { "path": "/americas", "title": "Americas" },
///   { "path": "/americas/buy-and-sell", "title": "Buy and Sell" }
/// ]
/// ```
///
/// # Errors
///
/// Returns 404 with code `not_found` for an unknown slug and
/// `invalid_input` for a malformed one.
pub async fn advertisement_breadcrumbs_handler(
    State(state): State<AppState>,
    Path(params): Path<AdvertisementPath>,
) -> Result<Response, AppError> {
    params.validate()?;

    let trail = state
        .breadcrumbs_service
        .for_advertisement(&params.slug)
        .await?;

    Ok(trail_response(&state, trail))
}

/// Trail of a classification listing inside a location.
///
/// # Endpoint
///
/// `GET /api/breadcrumbs/location/{location}/classification/{classification}`
///
/// # Errors
///
/// Returns 404 if either slug is unknown, or if the location is not
/// available on the requesting domain (code `unavailable`).
pub async fn classification_breadcrumbs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(params): Path<ClassificationPath>,
) -> Result<Response, AppError> {
    params.validate()?;

    let domain = current_domain(&state, &headers).await?;
    let query = BreadcrumbsQuery::classification(params.location, params.classification);
    let trail = state.breadcrumbs_service.resolve(&query, &domain).await?;

    Ok(trail_response(&state, trail))
}

/// Trail of a location page.
///
/// # Endpoint
///
/// `GET /api/breadcrumbs/location/{location}`
pub async fn location_breadcrumbs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(params): Path<LocationPath>,
) -> Result<Response, AppError> {
    params.validate()?;

    let domain = current_domain(&state, &headers).await?;
    let trail = state
        .breadcrumbs_service
        .resolve(&BreadcrumbsQuery::location(params.location), &domain)
        .await?;

    Ok(trail_response(&state, trail))
}

/// Trail for whichever page the query names.
///
/// # Endpoint
///
/// `GET /api/breadcrumbs?advertisement=..&location=..&classification=..`
///
/// An advertisement wins over a location. With neither, the request fails
/// with 404 `invalid_input`.
pub async fn breadcrumbs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BreadcrumbsParams>,
) -> Result<Response, AppError> {
    params.validate()?;

    let domain = current_domain(&state, &headers).await?;
    let trail = state
        .breadcrumbs_service
        .resolve(&params.into(), &domain)
        .await?;

    Ok(trail_response(&state, trail))
}

/// Trail of user pages: Home only.
///
/// # Endpoint
///
/// `GET /api/breadcrumbs/user`
pub async fn user_breadcrumbs_handler(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let trail = state.breadcrumbs_service.for_user()?;
    Ok(trail_response(&state, trail))
}

fn trail_response(state: &AppState, trail: Vec<Breadcrumb>) -> Response {
    let items: Vec<BreadcrumbItem> = trail.into_iter().map(BreadcrumbItem::from).collect();
    let cache_control = format!("public, s-maxage={}", state.breadcrumbs_max_age);

    ([(header::CACHE_CONTROL, cache_control)], Json(items)).into_response()
}
