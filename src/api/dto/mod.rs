//! Data Transfer Objects for API requests and responses.
//!
//! Path parameters are validated with `validator` before they reach a
//! service; responses are plain `serde` structs.

pub mod breadcrumbs;
pub mod health;
pub mod sitemap;

use regex::Regex;
use std::sync::LazyLock;

/// Slugs are lowercase ASCII words joined by `-` or `_`.
pub(crate) static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").unwrap());
