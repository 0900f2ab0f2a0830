//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod breadcrumbs;
pub mod health;
pub mod sitemap;

pub use breadcrumbs::{
    advertisement_breadcrumbs_handler, breadcrumbs_handler, classification_breadcrumbs_handler,
    location_breadcrumbs_handler, user_breadcrumbs_handler,
};
pub use health::health_handler;
pub use sitemap::{leaf_sitemap_handler, root_sitemap_handler};

use crate::domain::entities::Domain;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::extract_domain_from_headers;
use axum::http::HeaderMap;

/// Resolves the tenant a request is addressed to from its `Host` header.
async fn current_domain(state: &AppState, headers: &HeaderMap) -> Result<Domain, AppError> {
    let host = extract_domain_from_headers(headers)?;
    state.domain_service.resolve(&host).await
}
