//! CSS resolution: `@import` splicing, `url(...)` inlining and compression
//!
//! Scanning is regex-based rather than a real CSS parse. Imports and URLs
//! inside comments or strings are treated like any other occurrence, and
//! malformed or unusually nested CSS is left however the patterns leave it.

pub mod compress;
pub mod image_urls;
pub mod imports;

pub use compress::compress_css;
pub use image_urls::inline_image_urls;
pub use imports::resolve_imports;

/// Wrap `css` in an `@media` block for `media`
#[must_use]
pub fn wrap_media(media: &str, css: &str) -> String {
    format!("@media {media}{{{css}}}")
}
