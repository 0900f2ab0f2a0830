//! Tenant host extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Extracts the tenant host from the `Host` header.
///
/// The port is stripped, IPv6 literals keep their brackets, and the result
/// is lowercased without a trailing dot so it matches `domains.host`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the `Host` header is missing, empty
/// or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "Ads.Example.com:8080".parse().unwrap());
///
/// assert_eq!(extract_domain_from_headers(&headers).unwrap(), "ads.example.com");
/// ```
pub fn extract_domain_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let domain = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    if domain.is_empty() {
        return Err(AppError::bad_request("Empty Host header", json!({})));
    }

    Ok(domain)
}
