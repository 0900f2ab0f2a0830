//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`                                     - Database and cache checks
//! - `GET /sitemap.xml`                                - Root sitemap index
//! - `GET /sitemap/{location}/{classification}/{date}` - Leaf sitemap
//! - `/api/breadcrumbs/*`                              - Breadcrumb trails (JSON)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, leaf_sitemap_handler, root_sitemap_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with state and tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/sitemap.xml", get(root_sitemap_handler))
        .route(
            "/sitemap/{location}/{classification}/{date}",
            get(leaf_sitemap_handler),
        )
        .nest("/api", api::routes::breadcrumb_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
