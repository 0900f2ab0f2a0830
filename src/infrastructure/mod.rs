//! Infrastructure layer for external integrations.
//!
//! This layer implements the collaborator traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Tag-aware caching (Redis, in-memory and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`rendering`] - Askama sitemap templates
//! - [`routing`] - URL generation for site routes

pub mod cache;
pub mod persistence;
pub mod rendering;
pub mod routing;
