//! Resource fetching with per-run memoization
//!
//! `Fetcher::fetch` resolves a URL or local path to a body. Local files are
//! read straight from disk; everything else goes through a `Transport`.
//! Every fetch consults the run's `FetchContext` first, so each key hits disk
//! or the network at most once per run no matter how many callers ask for it
//! concurrently.

pub mod context;
pub mod transport;
pub mod types;

use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub use context::{Claim, FetchContext};
pub use transport::{HttpTransport, Transport};
pub use types::{FetchOptions, Origin, RawResponse, Resource, TransportFuture};

use crate::error::FetchError;
use crate::utils::{local_path, mime};

/// Stateless fetch front-end; per-run state lives in the `FetchContext`
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch `url` and render it according to `options`
    ///
    /// Non-success HTTP statuses and rejected content types resolve to an
    /// empty string. Transport failures, unreadable files and broken gzip
    /// bodies are errors.
    pub async fn fetch(
        &self,
        cx: &FetchContext,
        url: &str,
        options: FetchOptions<'_>,
    ) -> Result<String, FetchError> {
        let resource = self.resource(cx, url).await?;
        Ok(resource.render(url, &options))
    }

    /// Fetch the cached resource behind `url`, coalescing concurrent requests
    pub async fn resource(&self, cx: &FetchContext, url: &str) -> Result<Arc<Resource>, FetchError> {
        match cx.claim(url) {
            Claim::Cached(resource) => {
                log::debug!("Cache hit: {url}");
                Ok(resource)
            }
            Claim::Waiting(rx) => {
                log::debug!("Waiting on in-flight fetch: {url}");
                rx.await.map_err(|_| FetchError::Abandoned {
                    url: url.to_string(),
                })?
            }
            Claim::Leader(guard) => {
                let outcome = self.load(url).await.map(Arc::new);
                guard.complete(&outcome);
                outcome
            }
        }
    }

    async fn load(&self, url: &str) -> Result<Resource, FetchError> {
        if let Some(path) = local_path(url).await {
            return read_local(url, &path).await;
        }

        let raw = self.transport.get(url).await?;

        let body = if raw
            .content_encoding
            .as_deref()
            .is_some_and(|encoding| encoding.trim().eq_ignore_ascii_case("gzip"))
        {
            gunzip(url, &raw.body)?
        } else {
            raw.body
        };

        Ok(Resource {
            origin: Origin::Network { status: raw.status },
            content_type: raw.content_type,
            body,
        })
    }
}

async fn read_local(url: &str, path: &Path) -> Result<Resource, FetchError> {
    let body = tokio::fs::read(path).await.map_err(|e| FetchError::Io {
        path: url.to_string(),
        message: e.to_string(),
    })?;

    log::debug!("Read {} ({} bytes) from disk", path.display(), body.len());

    Ok(Resource {
        origin: Origin::Disk,
        content_type: Some(mime::from_path(path).to_string()),
        body,
    })
}

fn gunzip(url: &str, compressed: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut decoded = Vec::with_capacity(compressed.len() * 4);
    GzDecoder::new(compressed)
        .read_to_end(&mut decoded)
        .map_err(|e| FetchError::Decompress {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    Ok(decoded)
}
