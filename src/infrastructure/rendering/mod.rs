//! Askama-backed rendering of sitemap documents.
//!
//! Templates live in `templates/sitemap/` and are compiled into the binary.

use askama::Template;

use crate::domain::sitemap::{SitemapLink, SitemapRenderer};
use crate::error::AppError;

#[derive(Template)]
#[template(path = "sitemap/index.xml", escape = "html")]
struct SitemapIndexTemplate<'a> {
    entries: &'a [SitemapLink],
}

#[derive(Template)]
#[template(path = "sitemap/urlset.xml", escape = "html")]
struct UrlsetTemplate<'a> {
    entries: &'a [SitemapLink],
}

/// Renders sitemaps from compiled Askama templates. Output is XML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaSitemapRenderer;

impl SitemapRenderer for AskamaSitemapRenderer {
    fn render_index(&self, entries: &[SitemapLink]) -> Result<String, AppError> {
        Ok(SitemapIndexTemplate { entries }.render()?)
    }

    fn render_urlset(&self, entries: &[SitemapLink]) -> Result<String, AppError> {
        Ok(UrlsetTemplate { entries }.render()?)
    }
}
