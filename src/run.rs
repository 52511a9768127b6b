//! Per-run state threaded through every inlining step
//!
//! Nothing here outlives a single `Inliner::inline` call: the fetch cache, the
//! pending-request table and the counters are created with the run and dropped
//! with it.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::InlineOptions;
use crate::error::FetchError;
use crate::fetcher::{FetchContext, FetchOptions, Fetcher};

/// Asset categories the walker dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Style,
    Script,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Image => write!(f, "images"),
            AssetKind::Style => write!(f, "styles"),
            AssetKind::Script => write!(f, "scripts"),
        }
    }
}

/// Counts of what a run did, for the closing log line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub images: usize,
    pub stylesheets: usize,
    pub scripts: usize,
    pub dropped_scripts: usize,
}

#[derive(Debug, Default)]
struct Counters {
    images: AtomicUsize,
    stylesheets: AtomicUsize,
    scripts: AtomicUsize,
    dropped_scripts: AtomicUsize,
}

/// Everything an inlining step needs: options, the page URL, and the fetcher
/// bound to this run's cache
pub struct RunContext<'a> {
    pub options: &'a InlineOptions,
    pub page_url: String,
    fetcher: &'a Fetcher,
    fetch_context: FetchContext,
    counters: Counters,
}

impl<'a> RunContext<'a> {
    #[must_use]
    pub fn new(fetcher: &'a Fetcher, options: &'a InlineOptions, page_url: impl Into<String>) -> Self {
        Self {
            options,
            page_url: page_url.into(),
            fetcher,
            fetch_context: FetchContext::new(),
            counters: Counters::default(),
        }
    }

    /// Fetch through this run's cache
    pub async fn fetch(&self, url: &str, options: FetchOptions<'_>) -> Result<String, FetchError> {
        self.fetcher.fetch(&self.fetch_context, url, options).await
    }

    pub(crate) fn record(&self, kind: AssetKind) {
        let counter = match kind {
            AssetKind::Image => &self.counters.images,
            AssetKind::Style => &self.counters.stylesheets,
            AssetKind::Script => &self.counters.scripts,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped_script(&self) {
        self.counters.dropped_scripts.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            images: self.counters.images.load(Ordering::Relaxed),
            stylesheets: self.counters.stylesheets.load(Ordering::Relaxed),
            scripts: self.counters.scripts.load(Ordering::Relaxed),
            dropped_scripts: self.counters.dropped_scripts.load(Ordering::Relaxed),
        }
    }
}
