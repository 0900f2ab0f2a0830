//! HTTP layer: handlers, DTOs and middleware.
//!
//! Translates requests into service calls and formats the results as JSON
//! trails or XML sitemaps.
//!
//! # Modules
//!
//! - [`dto`] - Path parameters and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - API route composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
