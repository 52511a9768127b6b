//! Inlining pipeline
//!
//! ```text
//! FetchingRoot -> Parsing -> InliningAssets -> StrippingComments
//!              -> CollapsingWhitespace (optional) -> Serializing -> Done
//! ```
//!
//! Any stage can fail; the error is returned unchanged and nothing after the
//! failing stage runs. Each call to [`Inliner::inline`] gets a fresh fetch
//! cache, so runs never see each other's resources.

use std::sync::Arc;
use std::time::Instant;

use crate::assets::inline_assets;
use crate::config::InlineOptions;
use crate::dom::{Document, collapse_whitespace, protect_preformatted, strip_comments};
use crate::error::{InlineError, InlineResult};
use crate::fetcher::{FetchOptions, Fetcher, HttpTransport, Transport};
use crate::run::RunContext;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchingRoot,
    Parsing,
    InliningAssets,
    StrippingComments,
    CollapsingWhitespace,
    Serializing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::FetchingRoot => "fetching root document",
            Stage::Parsing => "parsing",
            Stage::InliningAssets => "inlining assets",
            Stage::StrippingComments => "stripping comments",
            Stage::CollapsingWhitespace => "collapsing whitespace",
            Stage::Serializing => "serializing",
        };
        f.write_str(name)
    }
}

/// Turns a page and everything it references into one HTML document
pub struct Inliner {
    options: InlineOptions,
    fetcher: Fetcher,
}

impl Inliner {
    /// Inliner that fetches over HTTP with `reqwest`
    #[must_use]
    pub fn new(options: InlineOptions) -> Self {
        let transport = HttpTransport::new(&options);
        Self::with_transport(options, Arc::new(transport))
    }

    /// Inliner that fetches through a caller-supplied transport
    #[must_use]
    pub fn with_transport(options: InlineOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            options,
            fetcher: Fetcher::new(transport),
        }
    }

    /// Inline the page at `source`, a URL or a local path
    ///
    /// A root document that comes back empty (non-success status) yields an
    /// empty string rather than an error.
    pub async fn inline(&self, source: &str) -> InlineResult<String> {
        let started = Instant::now();
        log::info!("Inlining {source}");

        let run = RunContext::new(&self.fetcher, &self.options, source);
        let html = self.run_stages(&run).await?;

        let summary = run.summary();
        log::info!(
            "Inlined {source} in {:.2?}: {} images, {} stylesheets, {} scripts, {} empty scripts dropped",
            started.elapsed(),
            summary.images,
            summary.stylesheets,
            summary.scripts,
            summary.dropped_scripts
        );
        Ok(html)
    }

    async fn run_stages(&self, run: &RunContext<'_>) -> InlineResult<String> {
        let mut stage = Stage::FetchingRoot;
        self.advance(run, &mut stage)
            .await
            .inspect_err(|e| match e {
                InlineError::Fetch(fetch) => log::error!(
                    "Inlining {} failed while {stage} at {}: {e}",
                    run.page_url,
                    fetch.location()
                ),
                _ => log::error!("Inlining {} failed while {stage}: {e}", run.page_url),
            })
    }

    async fn advance(&self, run: &RunContext<'_>, stage: &mut Stage) -> InlineResult<String> {
        let html = run.fetch(&run.page_url, FetchOptions::default()).await?;
        if html.is_empty() {
            log::warn!("Root document {} is empty", run.page_url);
            return Ok(String::new());
        }

        *stage = Stage::Parsing;
        let document = Document::parse(&html)?;

        *stage = Stage::InliningAssets;
        inline_assets(&document, run).await?;

        *stage = Stage::StrippingComments;
        let removed = strip_comments(document.root());
        log::debug!("Removed {removed} comments");

        let collapse = self.options.collapse_whitespace();
        if collapse {
            *stage = Stage::CollapsingWhitespace;
            protect_preformatted(document.root());
        }

        *stage = Stage::Serializing;
        let html = document.to_html()?;

        Ok(if collapse { collapse_whitespace(&html) } else { html })
    }
}

/// Inline `source` with a fresh HTTP-backed [`Inliner`]
pub async fn inline(source: &str, options: &InlineOptions) -> InlineResult<String> {
    Inliner::new(options.clone()).inline(source).await
}
