//! Request helpers shared by handlers.
//!
//! - [`extract_domain`] - Tenant host extraction from HTTP headers

pub mod extract_domain;
