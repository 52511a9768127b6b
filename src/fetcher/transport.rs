//! HTTP transport for the fetcher
//!
//! `Transport` is the seam between the fetch logic (caching, gzip, data URIs)
//! and the network. `HttpTransport` is the production implementation on top of
//! `reqwest`; tests substitute their own.
//!
//! The transport only reports what the server sent. Status interpretation and
//! decompression happen in the fetcher, so every transport gets them for free.

use futures::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;

use super::types::{RawResponse, TransportFuture};
use crate::config::InlineOptions;
use crate::error::FetchError;

/// Something that can perform a GET and hand back the raw response
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a>;
}

/// `reqwest`-backed transport with timeout, user agent and size cap
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
    user_agent: String,
    max_bytes: usize,
}

impl HttpTransport {
    #[must_use]
    pub fn new(options: &InlineOptions) -> Self {
        // Client already uses Arc internally, so clones share the pool
        Self::with_client(Client::new(), options)
    }

    #[must_use]
    pub fn with_client(client: Client, options: &InlineOptions) -> Self {
        Self {
            client,
            timeout: options.request_timeout(),
            user_agent: options.user_agent().to_string(),
            max_bytes: options.max_resource_bytes(),
        }
    }

    async fn download(&self, url: &str) -> Result<RawResponse, FetchError> {
        let http_error = |e: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            message: e.to_string(),
        };

        let mut request = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "*/*")
            .header(ACCEPT_ENCODING, "gzip");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(http_error)?;

        let status = response.status().as_u16();
        let header = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_encoding = header(CONTENT_ENCODING);

        // Enforce the size limit BEFORE downloading
        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > self.max_bytes as u64 {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }

        let mut buffer = if expected_size > 0 {
            Vec::with_capacity(expected_size as usize)
        } else {
            Vec::new()
        };

        // Stream response with size checking (Content-Length can lie or be absent)
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(http_error)?;

            if buffer.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_bytes,
                });
            }

            buffer.extend_from_slice(&chunk);
        }

        log::debug!(
            "GET {url} -> {status} ({} bytes, {})",
            buffer.len(),
            content_type.as_deref().unwrap_or("no content type")
        );

        Ok(RawResponse {
            status,
            content_type,
            content_encoding,
            body: buffer,
        })
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a> {
        Box::pin(self.download(url))
    }
}
