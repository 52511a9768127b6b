//! Shared configuration constants for the inliner
//!
//! Default values used by `InlineOptions` and the fetch layer, kept in one
//! place so the CLI, the builder and the tests agree.

use std::time::Duration;

/// Default per-request timeout: 30 seconds
///
/// A hung request stalls its asset branch and therefore the whole page, so
/// every request carries a timeout unless the caller explicitly disables it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on a single fetched resource: 10 MiB
///
/// Anything bigger is almost certainly not meant to be embedded in a page.
pub const DEFAULT_MAX_RESOURCE_BYTES: usize = 10 * 1024 * 1024;

/// Upper bound on `@import` rules spliced into one stylesheet
///
/// Stops a stylesheet that imports itself from looping forever.
pub const MAX_IMPORT_SPLICES: usize = 256;

/// Script hosts that are never fetched or minified
pub const DEFAULT_ANALYTICS_HOSTS: &[&str] = &["google-analytics.com"];

/// Doctype written in front of every inlined document
pub const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

/// Chrome user agent string sent with every HTTP request
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
