//! API route configuration.

use crate::api::handlers::{
    advertisement_breadcrumbs_handler, breadcrumbs_handler, classification_breadcrumbs_handler,
    location_breadcrumbs_handler, user_breadcrumbs_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Breadcrumb routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /breadcrumbs`                                                  - Trail by query
/// - `GET /breadcrumbs/advertisement/{slug}`                             - Advertisement trail
/// - `GET /breadcrumbs/location/{location}`                              - Location trail
/// - `GET /breadcrumbs/location/{location}/classification/{classification}` - Listing trail
/// - `GET /breadcrumbs/user`                                             - User pages trail
pub fn breadcrumb_routes() -> Router<AppState> {
    Router::new()
        .route("/breadcrumbs", get(breadcrumbs_handler))
        .route(
            "/breadcrumbs/advertisement/{slug}",
            get(advertisement_breadcrumbs_handler),
        )
        .route(
            "/breadcrumbs/location/{location}",
            get(location_breadcrumbs_handler),
        )
        .route(
            "/breadcrumbs/location/{location}/classification/{classification}",
            get(classification_breadcrumbs_handler),
        )
        .route("/breadcrumbs/user", get(user_breadcrumbs_handler))
}
