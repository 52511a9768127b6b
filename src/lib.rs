//! Turn a web page into one self-contained HTML document.
//!
//! Stylesheets (with their `@import` chains), scripts and optionally images
//! are fetched once each per run and embedded in place. Scripts can be
//! minified on the way in.
//!
//! ```no_run
//! # async fn demo() -> inliner::InlineResult<()> {
//! let options = inliner::InlineOptions::builder().images(true).build()?;
//! let html = inliner::inline("https://example.com/", &options).await?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod config;
pub mod css;
pub mod dom;
pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod run;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{InlineOptions, InlineOptionsBuilder};
pub use error::{FetchError, InlineError, InlineResult};
pub use fetcher::{FetchContext, FetchOptions, Fetcher, HttpTransport, RawResponse, Transport, TransportFuture};
pub use orchestrator::{Inliner, Stage, inline};
pub use run::{AssetKind, RunContext, RunSummary};
