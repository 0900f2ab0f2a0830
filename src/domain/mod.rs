//! Domain layer: taxonomy entities, path resolution and sitemap identities.
//!
//! Nothing in this layer performs I/O. Collaborators are expressed as traits
//! ([`repositories`], [`route::UrlGenerator`]) and implemented by the
//! infrastructure layer.
//!
//! # Modules
//!
//! - [`entities`] - Location, classification, advertisement and domain values
//! - [`breadcrumbs`] - Breadcrumb trail resolver
//! - [`route`] - Route descriptors and the URL generation contract
//! - [`sitemap`] - Sitemap enumeration items and the rendering contract
//! - [`sitemap_key`] - Sitemap cache keys and the invalidation tag
//! - [`repositories`] - Data access trait definitions

pub mod breadcrumbs;
pub mod entities;
pub mod repositories;
pub mod route;
pub mod sitemap;
pub mod sitemap_key;
