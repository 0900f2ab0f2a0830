//! Cache identities for generated sitemap documents.
//!
//! Keys are derived from length-prefixed components hashed with SHA-256, so
//! separators inside hosts or slugs can never make two distinct tuples share
//! a key.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Tag attached to every sitemap cache entry. Any change to advertisement
/// data invalidates all entries carrying it.
pub const ADVERTISEMENTS_TAG: &str = "advertisements";

const ROOT_PREFIX: &str = "sitemap_root";
const LEAF_PREFIX: &str = "sitemap_advertisements";

/// Key of the root sitemap index for a domain.
pub fn root_sitemap_key(domain: &str) -> String {
    build_key(ROOT_PREFIX, &[domain])
}

/// Key of a leaf sitemap listing ads of one location/classification/date.
pub fn leaf_sitemap_key(
    domain: &str,
    location: &str,
    classification: &str,
    date: NaiveDate,
) -> String {
    let date = date.format("%Y-%m-%d").to_string();
    build_key(LEAF_PREFIX, &[domain, location, classification, &date])
}

fn build_key(prefix: &str, components: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    for component in components {
        hasher.update((component.len() as u64).to_be_bytes());
        hasher.update(component.as_bytes());
    }
    format!("{}_{}", prefix, hex::encode(hasher.finalize()))
}
